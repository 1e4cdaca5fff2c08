// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Create-then-patch-on-conflict upserts for namespaced resources.
//!
//! The bootstrap re-runs against clusters it has already configured, so every
//! resource it creates must tolerate already being there. The strategy here is
//! the cheapest one that converges:
//!
//! 1. `POST` the full object
//! 2. On `409 Conflict`, merge-patch only the mutable `spec` under the same name
//! 3. Any other API error is returned to the caller unmodified
//!
//! The patch is not re-verified afterwards; a second writer changing the object
//! between the conflict and the patch is not detected. kindling assumes a
//! single operator on a single machine.
//!
//! # Example
//!
//! ```rust,no_run
//! use kindling::metallb::{address_pool, IPAddressPool};
//! use kindling::upsert::create_or_patch_spec;
//! use kube::{Api, Client};
//!
//! # async fn example(client: Client) -> Result<(), kube::Error> {
//! let api: Api<IPAddressPool> = Api::namespaced(client, "default");
//! let pool = address_pool("172.18.255.0/24");
//! create_or_patch_spec(&api, &pool, &pool.spec).await?;
//! # Ok(())
//! # }
//! ```

use kube::api::{Patch, PatchParams, PostParams};
use kube::{Api, Resource, ResourceExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::fmt::Debug;
use tracing::{debug, info};

/// HTTP status the API server returns when the object already exists
const HTTP_CONFLICT: u16 = 409;

/// Outcome of [`create_or_patch_spec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The object did not exist and was created
    Created,
    /// The object already existed; its spec was patched
    Patched,
}

/// Whether `err` is the API server rejecting a create because the object exists.
#[must_use]
pub fn is_conflict(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(response) if response.code == HTTP_CONFLICT)
}

/// Create `resource`, or merge-patch its `spec` if it already exists.
///
/// `spec` is sent as `{"spec": <spec>}` with a JSON merge patch, addressed by
/// the resource's own name.
///
/// # Errors
///
/// Returns a [`kube::Error`] if:
/// - The create fails with anything other than a conflict
/// - The patch after a conflict fails
///
/// Resources without a name cannot be patched; the server rejects the create
/// with a non-conflict error in that case.
pub async fn create_or_patch_spec<T, S>(
    api: &Api<T>,
    resource: &T,
    spec: &S,
) -> Result<UpsertOutcome, kube::Error>
where
    T: Resource<DynamicType = ()> + Clone + Debug + Serialize + DeserializeOwned,
    S: Serialize + ?Sized,
{
    let name = resource.name_any();
    let kind = T::kind(&());

    debug!(kind = %kind, name = %name, "Creating resource");

    match api.create(&PostParams::default(), resource).await {
        Ok(_) => {
            info!("Created {kind} {name}");
            Ok(UpsertOutcome::Created)
        }
        Err(e) if is_conflict(&e) => {
            debug!("{kind} {name} already exists, patching spec");

            let spec = serde_json::to_value(spec).map_err(kube::Error::SerdeError)?;
            let patch = json!({ "spec": spec });
            api.patch(&name, &PatchParams::default(), &Patch::Merge(&patch))
                .await?;

            info!("Patched {kind} {name} with updated spec");
            Ok(UpsertOutcome::Patched)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "upsert_tests.rs"]
mod upsert_tests;
