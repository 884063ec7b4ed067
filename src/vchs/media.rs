//! Media types, header names and API defaults

use std::fmt;

/// Default vCHS public API entry point
pub const DEFAULT_HOSTNAME: &str = "vchs.vmware.com";

/// Default API version sent in every Accept header
pub const DEFAULT_VERSION: &str = "5.7";

/// Response header carrying the vCHS session token
pub const VCHS_AUTHORIZATION_HEADER: &str = "vchs-authorization";

/// Header carrying the compute (vCloud Director) session token
pub const VCLOUD_AUTHORIZATION_HEADER: &str = "x-vcloud-authorization";

/// Schema classes carried in the `class` media-type parameter
pub mod class {
    pub const USER: &str = "com.vmware.vchs.iam.api.schema.v2.classes.user.User";
    pub const USERS: &str = "com.vmware.vchs.iam.api.schema.v2.classes.user.Users";
    pub const INSTANCE: &str = "com.vmware.vchs.sc.restapi.model.instancetype";
    pub const INSTANCE_SPEC: &str = "com.vmware.vchs.sc.restapi.model.instancespecparamstype";
    pub const BILLABLE_USAGE: &str = "vnd.vmware.vchs.metering.billableUsage";
    pub const BILLABLE_COSTS: &str = "vnd.vmware.vchs.metering.billableCosts";
    pub const SERVICE_GROUPS: &str = "vnd.vmware.vchs.billing.serviceGroups";
    pub const SERVICE_GROUP: &str = "vnd.vmware.vchs.billing.serviceGroup";
    pub const BILLED_COSTS: &str = "vnd.vmware.vchs.billing.billedCosts";
    pub const BILLED_USAGE: &str = "vnd.vmware.vchs.billing.billedUsage";
}

/// vCloud resource types referenced by links and resource entities
pub mod vcloud {
    pub const VDC: &str = "application/vnd.vmware.vcloud.vdc+xml";
    pub const VAPP: &str = "application/vnd.vmware.vcloud.vApp+xml";
    pub const VDC_TEMPLATE: &str = "vdcTemplate";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Base {
    Json,
    Xml,
    /// Any vCloud XML document (`application/*+xml`)
    VcloudXml,
}

/// Version-qualified media type for Accept and Content-Type headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaType<'a> {
    base: Base,
    class: Option<&'a str>,
    version: &'a str,
}

impl<'a> MediaType<'a> {
    pub fn json(version: &'a str) -> Self {
        Self {
            base: Base::Json,
            class: None,
            version,
        }
    }

    pub fn xml(version: &'a str) -> Self {
        Self {
            base: Base::Xml,
            class: None,
            version,
        }
    }

    pub fn vcloud_xml(version: &'a str) -> Self {
        Self {
            base: Base::VcloudXml,
            class: None,
            version,
        }
    }

    /// Name the schema the server should answer with
    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }
}

impl fmt::Display for MediaType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = match self.base {
            Base::Json => "application/json",
            Base::Xml => "application/xml",
            Base::VcloudXml => "application/*+xml",
        };
        f.write_str(base)?;
        if let Some(class) = self.class {
            write!(f, ";class={}", class)?;
        }
        write!(f, ";version={}", self.version)
    }
}
