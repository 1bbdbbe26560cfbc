use uuid::Uuid;

/// Supplies fresh block ids when a marker is first embedded.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// `blk-` followed by nine random hex digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("blk-{}", &hex[..9])
    }
}

/// Deterministic `<prefix>-1`, `<prefix>-2`, ... ids.
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

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
