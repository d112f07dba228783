//! Inventory management service

use validator::Validate;

use crate::{
    config::ImportMode,
    error::AppResult,
    models::{
        enums::Category,
        import_report::ImportReport,
        item::{CatalogEntry, CreateItem, Item, ItemQuery},
    },
    repository::Repository,
};

/// Starter inventory offered by the bulk import
pub const DEFAULT_CATALOG: [CatalogEntry; 50] = [
    // Digital cameras
    ("Canon EOS 5D Mark IV", Category::DigitalCamera, 2),
    ("Sony Alpha 7 IV", Category::DigitalCamera, 3),
    ("Fujifilm X-T5", Category::DigitalCamera, 2),
    ("Nikon Z6 II", Category::DigitalCamera, 2),
    ("Canon EOS R5", Category::DigitalCamera, 1),
    ("Sony Alpha 7S III", Category::DigitalCamera, 1),
    ("Panasonic Lumix GH6", Category::DigitalCamera, 2),
    ("Blackmagic Pocket 4K", Category::DigitalCamera, 2),
    ("Fujifilm X100V", Category::DigitalCamera, 1),
    ("Ricoh GR IIIx", Category::DigitalCamera, 1),
    ("Olympus OM-1", Category::DigitalCamera, 1),
    ("Canon EOS 90D", Category::DigitalCamera, 3),
    ("Nikon D850", Category::DigitalCamera, 1),
    ("Hasselblad X2D", Category::DigitalCamera, 1),
    ("Leica Q2", Category::DigitalCamera, 1),
    // Film cameras
    ("Canon AE-1 Program", Category::FilmCamera, 4),
    ("Nikon FM2", Category::FilmCamera, 4),
    ("Pentax K1000", Category::FilmCamera, 3),
    ("Minolta X-700", Category::FilmCamera, 3),
    ("Leica M6", Category::FilmCamera, 1),
    ("Olympus OM-1 (Film)", Category::FilmCamera, 2),
    ("Hasselblad 500C/M", Category::FilmCamera, 1),
    ("Mamiya RZ67", Category::FilmCamera, 1),
    ("Rolleiflex 2.8F", Category::FilmCamera, 1),
    ("Yashica Mat-124G", Category::FilmCamera, 2),
    ("Canon A-1", Category::FilmCamera, 2),
    ("Nikon F3", Category::FilmCamera, 2),
    ("Contax T2", Category::FilmCamera, 1),
    ("Fujifilm GA645", Category::FilmCamera, 1),
    ("Kodak Retina IIIC", Category::FilmCamera, 1),
    // Tripods and support
    ("Manfrotto MT055CXPRO4", Category::Tripod, 5),
    ("Manfrotto Befree Live", Category::Tripod, 3),
    ("Gitzo Systematic Series 3", Category::Tripod, 2),
    ("Benro Mach3", Category::Tripod, 4),
    ("Sachtler Ace XL (Fluid Head)", Category::Tripod, 2),
    ("DJI RS 3 Pro Gimbal", Category::Tripod, 2),
    ("Peak Design Travel Tripod", Category::Tripod, 1),
    ("Velbon Videomate 638", Category::Tripod, 3),
    ("Zhiyun Crane 3S", Category::Tripod, 1),
    ("iFootage Cobra Monopod", Category::Tripod, 2),
    // Projectors
    ("Epson EH-TW7000 4K", Category::Projector, 1),
    ("BenQ W1130", Category::Projector, 2),
    ("Sony VPL-VW290ES", Category::Projector, 1),
    ("XGIMI Horizon Pro", Category::Projector, 2),
    ("Panasonic PT-VMZ51 (Laser)", Category::Projector, 1),
    ("Optoma UHD35", Category::Projector, 1),
    ("Epson CO-FH02 Portable", Category::Projector, 3),
    ("NEC P525UL", Category::Projector, 1),
    ("JVC DLA-NP5", Category::Projector, 1),
    ("Dangbei Mars Pro", Category::Projector, 1),
];

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List inventory
    pub async fn list_items(&self, query: &ItemQuery) -> AppResult<Vec<Item>> {
        self.repository.items.list(query.available.unwrap_or(false)).await
    }

    /// Items that can currently be borrowed
    pub async fn list_available(&self) -> AppResult<Vec<Item>> {
        self.repository.items.list(true).await
    }

    /// Get item by ID
    pub async fn get_item(&self, id: i64) -> AppResult<Item> {
        self.repository.items.get_by_id(id).await
    }

    /// Add a new item; every unit starts in stock
    pub async fn create_item(&self, mut data: CreateItem) -> AppResult<Item> {
        data.name = data.name.trim().to_string();
        data.validate()?;

        let item = self.repository.items.create(&data).await?;
        tracing::info!(item_id = item.id, name = %item.name, qty = item.total_qty, "Item added to inventory");
        Ok(item)
    }

    /// Import the default catalog unless inventory already has items
    pub async fn import_defaults(&self) -> AppResult<ImportReport> {
        let report = self.repository.items.import_if_empty(&DEFAULT_CATALOG).await?;
        match report.imported {
            0 => tracing::warn!(existing = report.existing, "Default catalog import skipped"),
            n => tracing::info!(imported = n, "Default catalog imported"),
        }
        Ok(report)
    }

    /// Startup hook for `catalog.import_mode`
    pub async fn seed_on_startup(&self, mode: ImportMode) -> AppResult<Option<ImportReport>> {
        match mode {
            ImportMode::Manual => Ok(None),
            ImportMode::OnEmpty => {
                if self.repository.items.count().await? > 0 {
                    return Ok(None);
                }
                self.import_defaults().await.map(Some)
            }
        }
    }
}
