use uuid::Uuid;

/// Source of fresh entity ids. The store only needs ids to be unique within a
/// collection for its own lifetime; how they are minted is up to the caller.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Production generator backed by random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator that hands out `prefix-1`, `prefix-2`, ... Useful
/// for replaying a command sequence and comparing the resulting states.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
