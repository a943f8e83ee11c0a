pub mod account;
pub mod api_error;
pub mod app_state;
pub mod flags;
pub mod image;
pub mod linode;
pub mod object;
pub mod placement_group;
pub mod region;
pub mod request;
pub mod stackscript;

pub use account::{AccountAgreements, Profile};
pub use api_error::ApiError;
pub use app_state::AppState;
pub use flags::FeatureFlags;
pub use image::Image;
pub use linode::{Linode, LinodeSpecs, LinodeType, TypeClass};
pub use object::{ExtendedObject, ObjectStorageObject};
pub use placement_group::{PlacementGroup, PlacementGroupMember, PlacementGroupType};
pub use region::{Capability, PlacementGroupLimits, Region};
pub use request::{
    CreateLinodeRequest, EncryptionStatus, InterfacePayload, InterfacePurpose, Ipv4Config,
    Metadata, PlacementGroupPayload,
};
pub use stackscript::{StackScript, UserDefinedField};
