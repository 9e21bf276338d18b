use serde_derive::Serialize;

#[derive(Serialize)]
pub struct ResponseMeta<M: serde::Serialize> {
    pub time_taken: String,
    #[serde(flatten)]
    pub extra: M,
}

impl<M: serde::Serialize> ResponseMeta<M> {
    pub fn from(start: tokio::time::Instant, extra: M) -> Self {
        Self {
            time_taken: format!("{:?}", start.elapsed()),
            extra,
        }
    }
}
