//! Recording adapters that capture interactions to cassettes.

pub mod filesystem;

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{json, Value};

use crate::cassette::recorder::CassetteRecorder;

pub use filesystem::RecordingFileSystem;

/// One port's view of a shared cassette recorder.
///
/// Plain values are stored as-is. Fallible calls are stored as `{"Ok": v}`
/// or `{"Err": message}`, which is what `replaying::replay_result` decodes.
pub(crate) struct Tape {
    port: &'static str,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl Tape {
    pub(crate) fn new(port: &'static str, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { port, recorder }
    }

    /// Records a call whose return value cannot fail.
    pub(crate) fn value<I: Serialize, O: Serialize>(&self, method: &str, input: &I, output: &O) {
        self.push(method, input, encode(output));
    }

    /// Records a fallible call.
    pub(crate) fn result<I, T, E>(&self, method: &str, input: &I, result: &Result<T, E>)
    where
        I: Serialize,
        T: Serialize,
        E: Display,
    {
        let output = match result {
            Ok(value) => json!({ "Ok": encode(value) }),
            Err(err) => json!({ "Err": err.to_string() }),
        };
        self.push(method, input, output);
    }

    fn push<I: Serialize>(&self, method: &str, input: &I, output: Value) {
        let input = encode(input);
        self.recorder.lock().expect("recorder lock poisoned").record(self.port, method, input, output);
    }
}

fn encode<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("failed to serialize recorded value")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_use_ok_err_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tape.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "tape", "/w")));
        let tape = Tape::new("fs", Arc::clone(&recorder));

        tape.value("exists", &json!({"path": "/w/a"}), &true);
        tape.result("read_to_string", &json!({"path": "/w/a"}), &Ok::<_, String>("A"));
        tape.result("remove_file", &json!({"path": "/w/b"}), &Err::<(), _>("gone"));
        drop(tape);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();
        let cassette = crate::cassette::format::Cassette::from_yaml(
            &std::fs::read_to_string(&path).unwrap(),
        )
        .unwrap();
        let outputs: Vec<&Value> = cassette.interactions.iter().map(|i| &i.output).collect();
        assert_eq!(outputs, vec![&json!(true), &json!({"Ok": "A"}), &json!({"Err": "gone"})]);
        assert!(cassette.interactions.iter().all(|i| i.port == "fs"));
    }
}
