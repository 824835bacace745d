#[derive(Debug, thiserror::Error)]
pub enum TapError {
    #[error("failed to write to the default output sink: {0}")]
    Sink(#[from] std::io::Error),

    #[error("observer rejected SQL payload: {source}")]
    Observer {
        #[source]
        source: anyhow::Error,
    },
}
