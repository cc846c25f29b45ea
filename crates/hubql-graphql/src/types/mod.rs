//! Object type declarations for the GitHub entities.
//!
//! Each type is a static table of passthrough scalars plus a few relational
//! fields built from the shared descriptors in [`reference`]. Types point at
//! each other through `TypeRef::named`, which is only resolved when the
//! schema is finished, so mutually recursive types can be declared in any
//! order.

pub mod detailed_repo_info;
pub mod owner_repo_info;
pub mod reference;
pub mod user_info;

use async_graphql::dynamic::{Field, FieldFuture, Object, TypeRef};

use crate::resolvers::parent_field;

/// GraphQL name of the full user type.
pub const USER_INFO: &str = "UserInfo";

/// GraphQL name of the reduced user type embedded in repos.
pub const OWNER_REPO_INFO: &str = "OwnerRepoInfo";

/// GraphQL name of the repository type.
pub const DETAILED_REPO_INFO: &str = "DetailedRepoInfo";

/// GraphQL scalar a passthrough field is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `String`
    String,
    /// `Int`
    Int,
    /// `Boolean`
    Boolean,
}

impl ScalarKind {
    /// Returns the nullable type reference for this scalar.
    #[must_use]
    pub fn type_ref(self) -> TypeRef {
        TypeRef::named(match self {
            Self::String => TypeRef::STRING,
            Self::Int => TypeRef::INT,
            Self::Boolean => TypeRef::BOOLEAN,
        })
    }
}

/// Creates a field that returns the parent's value under the same key.
///
/// Absent keys resolve to `null`; the value is never coerced.
pub fn passthrough_field(name: &'static str, type_ref: TypeRef) -> Field {
    Field::new(name, type_ref, move |ctx| {
        FieldFuture::new(async move { Ok(parent_field(&ctx, name).cloned()) })
    })
}

/// Adds one passthrough field per `(name, kind)` entry.
pub(crate) fn with_scalars(mut obj: Object, scalars: &[(&'static str, ScalarKind)]) -> Object {
    for &(name, kind) in scalars {
        obj = obj.field(passthrough_field(name, kind.type_ref()));
    }
    obj
}
