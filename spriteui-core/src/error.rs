// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

use crate::control::ControlId;
use crate::graphics::GraphicsError;

/// Errors raised by misuse of the control tree.
///
/// These indicate a structural bug in the calling code and are returned
/// from the operation that detects them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UiError {
    /// A control was added while it already had a parent.
    #[error("Control '{name}' already has a parent")]
    ControlAlreadyParented {
        /// Name of the control.
        name: String,
    },

    /// A control was used as its own ancestor, or a parent did not exist.
    #[error("Control '{name}' cannot be a child of {parent}")]
    InvalidParent {
        /// Name of the control.
        name: String,
        /// Description of the rejected parent.
        parent: String,
    },

    /// The draw mode was changed after initialization.
    #[error("The draw mode of control '{name}' cannot be changed after initialization")]
    DrawModeLocked {
        /// Name of the control.
        name: String,
    },

    /// Scaling was set on a control that does not draw into its own render target.
    #[error("Control '{name}' needs a unique render target to be scaled")]
    ScalingRequiresUniqueRenderTarget {
        /// Name of the control.
        name: String,
    },

    /// Scaling below 1 was requested.
    #[error("Scaling of control '{name}' must be at least 1, got {scaling}")]
    InvalidScaling {
        /// Name of the control.
        name: String,
        /// The rejected value.
        scaling: i32,
    },

    /// Scaling was lowered below its value at initialization.
    #[error("Scaling of control '{name}' cannot go below its initial value {minimum}, got {scaling}")]
    ScalingBelowMinimum {
        /// Name of the control.
        name: String,
        /// The rejected value.
        scaling: i32,
        /// The value captured at initialization.
        minimum: i32,
    },

    /// Text longer than a text box's maximum length was set.
    #[error("Text of length {length} exceeds the maximum length {max_length} of '{name}'")]
    TextTooLong {
        /// Name of the control.
        name: String,
        /// Length of the rejected text in characters.
        length: usize,
        /// The maximum length.
        max_length: usize,
    },

    /// No factory is registered for a control type name.
    #[error("Unknown control type '{type_name}'")]
    UnknownControlType {
        /// The requested type name.
        type_name: String,
    },

    /// A control id does not refer to a live control.
    #[error("Control {id} does not exist")]
    ControlNotFound {
        /// The stale or unknown id.
        id: ControlId,
    },

    /// A layout document could not be parsed.
    #[error("Failed to parse layout: {details}")]
    LayoutParse {
        /// Description of the error.
        details: String,
    },

    /// The render target stack was misused.
    #[error(transparent)]
    Graphics(#[from] GraphicsError),
}
