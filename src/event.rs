/// One record read off the stream. `name` is free-form, only a few names
/// carry special meaning when dispatched.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    pub name: String,
    pub data: String,
}

impl Event {
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}
