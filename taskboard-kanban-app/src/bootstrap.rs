//! Locating the mount point in the host page and attaching the root unit

use crate::error::{AppError, Result};
use scraper::{Html, Selector};
use std::future::Future;

/// Host page used when none is configured
pub const DEFAULT_PAGE: &str = include_str!("../assets/index.html");

/// Mount id used when none is configured
pub const DEFAULT_MOUNT_ID: &str = "app";

/// The element the root unit attaches to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    pub id: String,
    pub tag: String,
    /// `data-title` of the element, if any
    pub title: Option<String>,
}

/// Find the element whose id is `id`
pub fn find_mount(page: &str, id: &str) -> Result<MountPoint> {
    let document = Html::parse_document(page);
    let with_id = Selector::parse("[id]").map_err(|e| AppError::Page(e.to_string()))?;

    let element = document
        .select(&with_id)
        .find(|element| element.value().id() == Some(id))
        .ok_or_else(|| AppError::MountNotFound { id: id.to_string() })?;

    let value = element.value();
    Ok(MountPoint {
        id: id.to_string(),
        tag: value.name().to_string(),
        title: value.attr("data-title").map(str::to_string),
    })
}

/// Attach a root unit to the page.
///
/// The mount point is resolved first; `create_root` only runs once it has
/// been found, so a page without the element never instantiates anything.
pub async fn mount<R, F, Fut>(page: &str, id: &str, create_root: F) -> Result<(MountPoint, R)>
where
    F: FnOnce(MountPoint) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    let mount_point = find_mount(page, id)?;
    tracing::debug!(id = %mount_point.id, tag = %mount_point.tag, "mount point found");
    let root = create_root(mount_point.clone()).await?;
    Ok((mount_point, root))
}
