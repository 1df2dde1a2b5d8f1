use serde::Serialize;

/// One entry of a controller's site directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    /// Short code used in site-scoped API paths (e.g. `"default"`, `"x8k2pq"`).
    pub name: String,
    /// Display name shown in the controller UI.
    pub desc: String,
}
