use crate::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Text rendering of a column, decoding blobs. Missing columns are empty.
    pub fn text_at(&self, index: usize) -> String {
        self.get(index).map(Value::to_text).unwrap_or_default()
    }
}
