//! Application areas (the scopes a request or install step can run in).

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Permission;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Global,
    Frontend,
    Adminhtml,
    Crontab,
    WebapiRest,
}

impl Area {
    pub fn code(&self) -> &'static str {
        match self {
            Area::Global => "global",
            Area::Frontend => "frontend",
            Area::Adminhtml => "adminhtml",
            Area::Crontab => "crontab",
            Area::WebapiRest => "webapi_rest",
        }
    }

    /// Permissions granted to any context running in this area.
    pub fn granted_permissions(&self) -> Vec<Permission> {
        match self {
            Area::Adminhtml => vec![Permission::WILDCARD],
            Area::Crontab => vec![
                Permission::CATALOG_PRODUCT_READ,
                Permission::INVENTORY_SOURCE_ITEM_WRITE,
            ],
            Area::Global | Area::Frontend | Area::WebapiRest => {
                vec![Permission::CATALOG_PRODUCT_READ]
            }
        }
    }
}

impl core::fmt::Display for Area {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Area {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "global" => Ok(Area::Global),
            "frontend" => Ok(Area::Frontend),
            "adminhtml" => Ok(Area::Adminhtml),
            "crontab" => Ok(Area::Crontab),
            "webapi_rest" => Ok(Area::WebapiRest),
            other => Err(format!("unknown area code '{other}'")),
        }
    }
}
