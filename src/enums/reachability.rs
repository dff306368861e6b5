use crate::common::*;

#[doc = "Outcome of the per cluster credential check"]
/// A failed check never aborts the run; it only excludes the cluster, so the
/// check is a value rather than an error path. The variant records which side
/// failed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    EsUnreachable(String),
    KibanaUnreachable(String),
    KibanaBadStatus(u16),
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable)
    }

    #[doc = "Failure reason for the log event; None when reachable"]
    pub fn reason(&self) -> Option<String> {
        match self {
            Reachability::Reachable => None,
            Reachability::EsUnreachable(reason) => {
                Some(format!("search endpoint unreachable: {}", reason))
            }
            Reachability::KibanaUnreachable(reason) => {
                Some(format!("dashboard endpoint unreachable: {}", reason))
            }
            Reachability::KibanaBadStatus(status) => {
                Some(format!("dashboard endpoint returned status {}", status))
            }
        }
    }
}
