//! Errors raised by graph mutations and user commands.

/// Graph store mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	#[error("a node named {0:?} already exists")]
	AlreadyExists(String),
	#[error("no central node has been set")]
	NoCentralNode,
}

/// Reasons a user command is rejected. A rejected command never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
	#[error("please fill in the {0} field")]
	EmptyField(&'static str),
	#[error("a node named {0:?} already exists")]
	DuplicateIdentity(String),
	#[error("please set the central topic first")]
	MissingCentralNode,
	#[error("unknown category {0:?}")]
	UnknownCategory(String),
}

impl From<StoreError> for CommandError {
	fn from(err: StoreError) -> Self {
		match err {
			StoreError::AlreadyExists(id) => CommandError::DuplicateIdentity(id),
			StoreError::NoCentralNode => CommandError::MissingCentralNode,
		}
	}
}
