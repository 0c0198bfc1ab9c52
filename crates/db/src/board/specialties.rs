//! Specialty listing, lookup and management.

use sirn_core::error::CoreError;
use sirn_core::normalize::{require_text, validate_slug};
use sirn_core::types::DbId;
use sqlx::PgPool;

use crate::error::classify_store_error;
use crate::models::specialty::{CreateSpecialty, Specialty, SpecialtyWithCounts};
use crate::repositories::SpecialtyRepo;

/// List active specialties ordered by `display_order`, each with its
/// active-project count and the open-slot count across those projects.
///
/// Fails closed: if the store is unreachable the listing is empty rather
/// than an error, so read paths stay renderable. Other failures surface.
pub async fn list_active_specialties_with_counts(
    pool: &PgPool,
) -> Result<Vec<SpecialtyWithCounts>, CoreError> {
    match SpecialtyRepo::list_active_with_counts(pool)
        .await
        .map_err(classify_store_error)
    {
        Ok(specialties) => Ok(specialties),
        Err(CoreError::StoreUnavailable(reason)) => {
            tracing::warn!(%reason, "Store unavailable, returning empty specialty listing");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

/// Look up a specialty by its routing slug.
pub async fn get_specialty_by_slug(pool: &PgPool, slug: &str) -> Result<Specialty, CoreError> {
    SpecialtyRepo::find_by_slug(pool, slug)
        .await
        .map_err(classify_store_error)?
        .ok_or_else(|| CoreError::not_found("Specialty", slug))
}

/// Create a specialty. Duplicate names or slugs fail with `Conflict`.
pub async fn create_specialty(
    pool: &PgPool,
    input: &CreateSpecialty,
) -> Result<Specialty, CoreError> {
    let slug = input.slug.trim().to_string();
    validate_slug(&slug)?;
    let normalized = CreateSpecialty {
        name: require_text("name", &input.name)?,
        slug,
        display_order: input.display_order,
        is_active: input.is_active,
    };

    let specialty = SpecialtyRepo::create(pool, &normalized)
        .await
        .map_err(classify_store_error)?;

    tracing::info!(specialty_id = %specialty.id, slug = %specialty.slug, "Specialty created");
    Ok(specialty)
}

/// Delete a specialty together with all of its projects and their children.
pub async fn delete_specialty(pool: &PgPool, id: DbId) -> Result<(), CoreError> {
    let deleted = SpecialtyRepo::delete(pool, id)
        .await
        .map_err(classify_store_error)?;
    if !deleted {
        return Err(CoreError::not_found("Specialty", id));
    }
    tracing::info!(specialty_id = %id, "Specialty deleted");
    Ok(())
}
