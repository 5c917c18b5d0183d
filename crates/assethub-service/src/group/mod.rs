//! Main group and sub group management.

pub mod service;

pub use service::{
    CreateSubGroupRequest, GroupRequest, GroupService, GroupWithChildren, UpdateSubGroupRequest,
};
