use gb_core::{CellReader, ReactiveCell};

/// Latest known state of the update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Checking,
    UpToDate,
    Available { version: String, notes: Option<String> },
    Downloading,
    ReadyToInstall { version: String },
    Error { message: String },
}

/// Holds the update-check status for the UI.
///
/// The status stays `Unset` until the first check reports in; the check loop
/// is the only writer.
#[derive(Debug, Default)]
pub struct UpdaterService {
    status: ReactiveCell<UpdateStatus>,
}

impl UpdaterService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn status(&self) -> CellReader<UpdateStatus> {
        self.status.reader()
    }

    pub fn report(&self, status: UpdateStatus) {
        tracing::debug!(?status, "Update status changed");
        self.status.set(status);
    }
}
