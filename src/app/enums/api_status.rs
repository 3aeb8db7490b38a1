#[derive(Clone)]
pub enum ApiStatus {
    Online,
}

impl ApiStatus {
    pub fn value(&self) -> String {
        match *self {
            Self::Online => "online".to_string(),
        }
    }
}
