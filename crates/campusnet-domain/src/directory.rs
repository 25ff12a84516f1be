//! Campus directory reference data, stored under `Directory/`.
//!
//! Used by profile setup: department → major → class, each level filtered by
//! the selection above it.

use serde::{Deserialize, Serialize};

/// A department, stored at `Directory/Departments/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Directory id, used as the path segment
    pub department_id: String,

    /// Display name
    pub name: String,
}

/// A major, stored at `Directory/Majors/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    /// Directory id, used as the path segment
    pub major_id: String,

    /// Display name
    pub name: String,

    /// Owning department
    pub department_id: String,
}

/// A class, stored at `Directory/Classes/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    /// Directory id, used as the path segment
    pub class_id: String,

    /// Display name
    pub name: String,

    /// Owning major
    pub major_id: String,
}
