//! Pure path composition. Nothing here performs I/O; the dispatcher appends
//! these paths to the session's base URL.

use crate::array_id::ArrayId;

/// One hierarchical REST resource on an array.
///
/// Immutable once built; compose a fresh address per call. The rendered
/// shape is `/{apiVersion}/{category}/symmetrix/{arrayId}/{resourceType}`
/// with an optional trailing `/{resourceName}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAddress {
    api_version: String,
    category: String,
    array_id: ArrayId,
    resource_type: String,
    resource_name: Option<String>,
}

impl ResourceAddress {
    pub fn new(
        api_version: impl Into<String>,
        category: impl Into<String>,
        array_id: &ArrayId,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            category: category.into(),
            array_id: array_id.clone(),
            resource_type: resource_type.into(),
            resource_name: None,
        }
    }

    /// Name the resource instance. The name may carry embedded sub-path
    /// segments, e.g. `"SG1/snapshot/snap1/generation/0"`; they are
    /// concatenated verbatim, well-formedness is the caller's
    /// responsibility.
    #[must_use]
    pub fn with_resource_name(mut self, resource_name: impl Into<String>) -> Self {
        self.resource_name = Some(resource_name.into());
        self
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Render the target path.
    pub fn path(&self) -> String {
        let mut target = format!(
            "/{ver}/{cat}/symmetrix/{array}/{res_type}",
            ver = self.api_version,
            cat = self.category,
            array = self.array_id,
            res_type = self.resource_type,
        );
        if let Some(resource_name) = &self.resource_name {
            target.push('/');
            target.push_str(resource_name);
        }
        target
    }
}

/// Path of the job-status resource for `job_id`.
pub fn job_path(api_version: &str, job_id: &str) -> String {
    format!("/{api_version}/system/job/{job_id}")
}

/// Path of the versionless server-version resource.
pub fn version_path() -> String {
    "/version".to_string()
}

/// Path of the symmetrix listing, one entry per managed array.
pub fn symmetrix_list_path(api_version: &str) -> String {
    format!("/{api_version}/system/symmetrix")
}

/// Path of one page of a result iterator.
pub fn iterator_page_path(iterator_id: &str) -> String {
    format!("/common/Iterator/{iterator_id}/page")
}
