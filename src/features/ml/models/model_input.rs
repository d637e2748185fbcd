/// Input accepted by an analysis model
#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Text(String),
    Bytes(Vec<u8>),
}

impl ModelInput {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl From<String> for ModelInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for ModelInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
