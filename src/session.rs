use crate::error::CalcError;
use crate::eval::evaluate;
use crate::lexer::tokenize;
use crate::parser::Parser;
use crate::resolve::{resolve_symbols, Bindings};

/// One past calculation: the expression as the user typed it, and its
/// result. Entries are only ever appended; display order is chronological.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: f64,
}

/// The per-user calculator state: the memory register, the last successful
/// result (the value of `ans`), and the calculation history.
///
/// All mutation goes through these methods. A failed evaluation leaves the
/// session exactly as it was; only success appends to history and moves
/// `ans`. The intended discipline is one `Session` per logical user —
/// callers sharing an instance across threads must serialize whole calls,
/// since evaluation reads `ans` and `m` that a concurrent call may write.
#[derive(Debug, Clone, Default)]
pub struct Session {
    memory: f64,
    last_result: f64,
    history: Vec<HistoryEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the full pipeline over `raw` and records the outcome on
    /// success: tokenize, resolve `pi`/`e`/`ans`/`m`, parse, evaluate, then
    /// append `(raw, result)` to history and update `ans`.
    pub fn evaluate_and_record(&mut self, raw: &str) -> Result<f64, CalcError> {
        let bindings = Bindings {
            ans: self.last_result,
            memory: self.memory,
        };

        let tokens = resolve_symbols(tokenize(raw)?, &bindings);
        let tree = Parser::new(tokens).parse()?;
        let result = evaluate(&tree)?;

        self.history.push(HistoryEntry {
            expression: raw.to_string(),
            result,
        });
        self.last_result = result;

        Ok(result)
    }

    pub fn store(&mut self, value: f64) {
        self.memory = value;
    }

    pub fn add_memory(&mut self, value: f64) {
        self.memory += value;
    }

    pub fn subtract_memory(&mut self, value: f64) {
        self.memory -= value;
    }

    pub fn clear_memory(&mut self) {
        self.memory = 0.0;
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// The last successful result, `0.0` before any evaluation.
    pub fn last_result(&self) -> f64 {
        self.last_result
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
