//! JSON Patch documents applied to flat DTOs.
//!
//! A document is an ordered list of field-level operations in the RFC 6902
//! shape:
//!
//! ```json
//! [
//!   { "op": "replace", "path": "/firstName", "value": "Johnny" },
//!   { "op": "remove",  "path": "/lastName" }
//! ]
//! ```
//!
//! Only single-segment paths are meaningful for the DTOs in this crate.
//! `move` and `copy` are not supported and fail deserialization.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::AppError;

/// A DTO whose string fields can be addressed by a patch path.
pub trait Patchable {
    /// Sets `field` to `value`; the message describes why it could not be set.
    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), String>;

    /// Resets `field` to its empty value.
    fn clear_field(&mut self, field: &str) -> Result<(), String>;

    /// Current value of `field`, or `None` if the field does not exist.
    fn field_value(&self, field: &str) -> Option<Value>;
}

/// One operation of a patch document, tagged by its `op` member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    /// The JSON pointer this operation targets.
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Test { path, .. } => path,
        }
    }

    fn apply<T: Patchable>(&self, target: &mut T) -> Result<(), String> {
        let field = field_from_path(self.path())?;
        match self {
            PatchOperation::Add { value, .. } | PatchOperation::Replace { value, .. } => {
                target.set_field(&field, value)
            }
            PatchOperation::Remove { .. } => target.clear_field(&field),
            PatchOperation::Test { value, .. } => match target.field_value(&field) {
                Some(current) if &current == value => Ok(()),
                Some(current) => Err(format!("Test failed: expected {value}, found {current}")),
                None => Err(format!("Unknown field '{field}'")),
            },
        }
    }
}

/// An ordered sequence of patch operations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

/// A patch operation that could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchError {
    pub index: usize,
    pub path: String,
    pub message: String,
}

impl PatchDocument {
    /// Applies every operation in order, stopping at the first failure.
    ///
    /// `target` should be a scratch copy: operations before the failing one
    /// have already been applied when an error is returned.
    pub fn apply_to<T: Patchable>(&self, target: &mut T) -> Result<(), PatchError> {
        for (index, op) in self.0.iter().enumerate() {
            op.apply(target).map_err(|message| PatchError {
                index,
                path: op.path().to_string(),
                message,
            })?;
        }
        Ok(())
    }
}

impl From<PatchError> for AppError {
    fn from(e: PatchError) -> Self {
        let key = field_from_path(&e.path).unwrap_or(e.path);
        AppError::unprocessable(
            "Patch could not be applied",
            json!({ key: [e.message], "operation": e.index }),
        )
    }
}

/// Decodes a one-segment JSON pointer such as `/firstName`.
fn field_from_path(path: &str) -> Result<String, String> {
    let segment = path
        .strip_prefix('/')
        .ok_or_else(|| format!("Path '{path}' must start with '/'"))?;

    if segment.is_empty() || segment.contains('/') {
        return Err(format!("Path '{path}' must name a single field"));
    }

    Ok(segment.replace("~1", "/").replace("~0", "~"))
}
