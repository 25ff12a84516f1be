//! Campus directory reference data: departments, majors, classes.

use crate::{DocumentDb, StoreError};
use campusnet_domain::directory::{Class, Department, Major};
use campusnet_domain::TreePath;

fn department_path(id: &str) -> Result<TreePath, StoreError> {
    Ok(TreePath::new(["Directory", "Departments", id])?)
}

fn major_path(id: &str) -> Result<TreePath, StoreError> {
    Ok(TreePath::new(["Directory", "Majors", id])?)
}

fn class_path(id: &str) -> Result<TreePath, StoreError> {
    Ok(TreePath::new(["Directory", "Classes", id])?)
}

/// Typed view over the directory subtree
pub struct Directory<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> Directory<'a> {
    /// Borrow the store for directory operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Add or replace a department
    pub fn add_department(&mut self, department: &Department) -> Result<(), StoreError> {
        self.db.put(
            &department_path(&department.department_id)?,
            serde_json::to_value(department)?,
        )?;
        Ok(())
    }

    /// Add or replace a major
    pub fn add_major(&mut self, major: &Major) -> Result<(), StoreError> {
        self.db
            .put(&major_path(&major.major_id)?, serde_json::to_value(major)?)?;
        Ok(())
    }

    /// Add or replace a class
    pub fn add_class(&mut self, class: &Class) -> Result<(), StoreError> {
        self.db
            .put(&class_path(&class.class_id)?, serde_json::to_value(class)?)?;
        Ok(())
    }

    /// All departments, sorted by name
    pub fn departments(&self) -> Result<Vec<Department>, StoreError> {
        let base = TreePath::new(["Directory", "Departments"])?;
        let mut departments = Vec::new();
        for (segment, doc) in self.db.children(&base)? {
            let department: Department = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(segment.clone(), e.to_string()))?;
            departments.push(department);
        }
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    /// Majors within one department, sorted by name
    pub fn majors_in(&self, department_id: &str) -> Result<Vec<Major>, StoreError> {
        let base = TreePath::new(["Directory", "Majors"])?;
        let mut majors = Vec::new();
        for (segment, doc) in self.db.children(&base)? {
            let major: Major = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(segment.clone(), e.to_string()))?;
            if major.department_id == department_id {
                majors.push(major);
            }
        }
        majors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(majors)
    }

    /// Classes within one major, sorted by name
    pub fn classes_in(&self, major_id: &str) -> Result<Vec<Class>, StoreError> {
        let base = TreePath::new(["Directory", "Classes"])?;
        let mut classes = Vec::new();
        for (segment, doc) in self.db.children(&base)? {
            let class: Class = serde_json::from_value(doc.value)
                .map_err(|e| StoreError::InvalidData(segment.clone(), e.to_string()))?;
            if class.major_id == major_id {
                classes.push(class);
            }
        }
        classes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(classes)
    }
}
