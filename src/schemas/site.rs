use serde::Serialize;

use crate::core::site::SiteConfig;
use crate::core::time::format_primitive;
use crate::db::models::{Branch, BranchPhone, Bulletin, GalleryImage};

#[derive(Debug, Serialize)]
pub(crate) struct BulletinResponse {
    pub(crate) id: String,
    pub(crate) text: String,
    pub(crate) is_active: bool,
    pub(crate) updated_at: String,
}

impl BulletinResponse {
    pub(crate) fn from_db(bulletin: Bulletin) -> Self {
        Self {
            id: bulletin.id,
            text: bulletin.text,
            is_active: bulletin.is_active,
            updated_at: format_primitive(bulletin.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BranchResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) image_key: Option<String>,
    pub(crate) phone_number: String,
    pub(crate) address: String,
    pub(crate) google_map_link: String,
}

impl BranchResponse {
    pub(crate) fn from_db(branch: Branch) -> Self {
        Self {
            id: branch.id,
            name: branch.name,
            image_key: branch.image_key,
            phone_number: branch.phone_number,
            address: branch.address,
            google_map_link: branch.google_map_link,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BranchPhoneResponse {
    pub(crate) id: String,
    pub(crate) label: String,
    pub(crate) phone_number: String,
}

impl BranchPhoneResponse {
    pub(crate) fn from_db(phone: BranchPhone) -> Self {
        Self { id: phone.id, label: phone.label, phone_number: phone.phone_number }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GalleryImageResponse {
    pub(crate) id: String,
    pub(crate) image_key: String,
    pub(crate) caption: String,
    pub(crate) created_at: String,
}

impl GalleryImageResponse {
    pub(crate) fn from_db(image: GalleryImage) -> Self {
        Self {
            id: image.id,
            image_key: image.image_key,
            caption: image.caption,
            created_at: format_primitive(image.created_at),
        }
    }
}

/// Everything the original exposed through its template context processor.
#[derive(Debug, Serialize)]
pub(crate) struct SiteInfoResponse {
    pub(crate) site_name: String,
    pub(crate) logo_url: Option<String>,
    pub(crate) hero_background_url: Option<String>,
    pub(crate) dashboard_background_url: Option<String>,
    pub(crate) whatsapp_number: Option<String>,
    pub(crate) facebook_url: Option<String>,
    pub(crate) contact_phone: Option<String>,
    pub(crate) active_bulletin: Option<BulletinResponse>,
    pub(crate) branch_phones: Vec<BranchPhoneResponse>,
}

impl SiteInfoResponse {
    pub(crate) fn new(
        config: SiteConfig,
        active_bulletin: Option<BulletinResponse>,
        branch_phones: Vec<BranchPhoneResponse>,
    ) -> Self {
        Self {
            site_name: config.site_name,
            logo_url: config.logo_url,
            hero_background_url: config.hero_background_url,
            dashboard_background_url: config.dashboard_background_url,
            whatsapp_number: config.whatsapp_number,
            facebook_url: config.facebook_url,
            contact_phone: config.contact_phone,
            active_bulletin,
            branch_phones,
        }
    }
}
