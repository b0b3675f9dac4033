//! Access control policies for buckets and objects.

use serde::{Deserialize, Serialize};

use crate::bucket::Owner;

/// Permission granted to a grantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    /// Read objects and listings.
    Read,
    /// Write and delete objects.
    Write,
    /// Everything, including ACL administration.
    FullControl,
}

/// Whether a grant targets a single user or a user group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrantType {
    /// A single access id.
    User,
    /// A predefined user group, see [`UserGroups`].
    Group,
}

/// Predefined grantee groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserGroups {
    /// Everyone, authenticated or not.
    AllUsers,
    /// Any authenticated FDS user.
    AuthenticatedUsers,
}

impl UserGroups {
    /// The grantee id string the server expects for this group.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            UserGroups::AllUsers => "ALL_USERS",
            UserGroups::AuthenticatedUsers => "AUTHENTICATED_USERS",
        }
    }
}

/// The receiver of a grant: an access id or a group name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grantee {
    /// Access id or predefined group name.
    pub id: String,
}

/// One entry of an access control list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grant {
    /// Who the permission is granted to.
    pub grantee: Grantee,
    /// The granted permission.
    pub permission: Permission,
    /// User or group grant.
    #[serde(rename = "type")]
    pub grant_type: GrantType,
}

impl Grant {
    /// Grant a permission to a single user.
    #[must_use]
    pub fn user(id: impl Into<String>, permission: Permission) -> Self {
        Self {
            grantee: Grantee { id: id.into() },
            permission,
            grant_type: GrantType::User,
        }
    }

    /// Grant a permission to a predefined group.
    #[must_use]
    pub fn group(group: UserGroups, permission: Permission) -> Self {
        Self {
            grantee: Grantee {
                id: group.name().to_owned(),
            },
            permission,
            grant_type: GrantType::Group,
        }
    }
}

/// The full access control policy of a bucket or object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessControlPolicy {
    /// Resource owner; filled by the server on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    /// All grants on the resource.
    #[serde(default)]
    pub access_control_list: Vec<Grant>,
}

impl AccessControlPolicy {
    /// Append a grant.
    pub fn add_grant(&mut self, grant: Grant) {
        self.access_control_list.push(grant);
    }

    /// A policy with the single grant that makes a resource publicly
    /// readable.
    #[must_use]
    pub fn public_read() -> Self {
        Self {
            owner: None,
            access_control_list: vec![Grant::group(UserGroups::AllUsers, Permission::Read)],
        }
    }
}
