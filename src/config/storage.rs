//! Configuration storage tables.

use serde::{Deserialize, Serialize};

/// Logical role of a table in phpMyAdmin's configuration storage database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageRole {
    Bookmark,
    Relation,
    TableInfo,
    TableCoords,
    PdfPages,
    ColumnInfo,
    History,
    TableUiprefs,
    Tracking,
    Userconfig,
    Recent,
    Favorite,
    Users,
    Usergroups,
    NavigationHiding,
    SavedSearches,
    CentralColumns,
    DesignerSettings,
    ExportTemplates,
}

impl StorageRole {
    /// All roles in the order phpMyAdmin documents them.
    pub const ALL: [StorageRole; 19] = [
        StorageRole::Bookmark,
        StorageRole::Relation,
        StorageRole::TableInfo,
        StorageRole::TableCoords,
        StorageRole::PdfPages,
        StorageRole::ColumnInfo,
        StorageRole::History,
        StorageRole::TableUiprefs,
        StorageRole::Tracking,
        StorageRole::Userconfig,
        StorageRole::Recent,
        StorageRole::Favorite,
        StorageRole::Users,
        StorageRole::Usergroups,
        StorageRole::NavigationHiding,
        StorageRole::SavedSearches,
        StorageRole::CentralColumns,
        StorageRole::DesignerSettings,
        StorageRole::ExportTemplates,
    ];

    /// Server directive naming the table for this role.
    pub fn key(self) -> &'static str {
        match self {
            StorageRole::Bookmark => "bookmarktable",
            StorageRole::Relation => "relation",
            StorageRole::TableInfo => "table_info",
            StorageRole::TableCoords => "table_coords",
            StorageRole::PdfPages => "pdf_pages",
            StorageRole::ColumnInfo => "column_info",
            StorageRole::History => "history",
            StorageRole::TableUiprefs => "table_uiprefs",
            StorageRole::Tracking => "tracking",
            StorageRole::Userconfig => "userconfig",
            StorageRole::Recent => "recent",
            StorageRole::Favorite => "favorite",
            StorageRole::Users => "users",
            StorageRole::Usergroups => "usergroups",
            StorageRole::NavigationHiding => "navigationhiding",
            StorageRole::SavedSearches => "savedsearches",
            StorageRole::CentralColumns => "central_columns",
            StorageRole::DesignerSettings => "designer_settings",
            StorageRole::ExportTemplates => "export_templates",
        }
    }

    /// Table name created by phpMyAdmin's `create_tables.sql`.
    pub fn default_table(self) -> String {
        match self {
            StorageRole::Bookmark => "pma__bookmark".to_string(),
            other => format!("pma__{}", other.key()),
        }
    }
}

/// Physical table names for each storage role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageTables {
    #[serde(rename = "bookmarktable")]
    pub bookmark: String,
    pub relation: String,
    pub table_info: String,
    pub table_coords: String,
    pub pdf_pages: String,
    pub column_info: String,
    pub history: String,
    pub table_uiprefs: String,
    pub tracking: String,
    pub userconfig: String,
    pub recent: String,
    pub favorite: String,
    pub users: String,
    pub usergroups: String,
    pub navigationhiding: String,
    pub savedsearches: String,
    pub central_columns: String,
    pub designer_settings: String,
    pub export_templates: String,
}

impl Default for StorageTables {
    fn default() -> Self {
        Self {
            bookmark: StorageRole::Bookmark.default_table(),
            relation: StorageRole::Relation.default_table(),
            table_info: StorageRole::TableInfo.default_table(),
            table_coords: StorageRole::TableCoords.default_table(),
            pdf_pages: StorageRole::PdfPages.default_table(),
            column_info: StorageRole::ColumnInfo.default_table(),
            history: StorageRole::History.default_table(),
            table_uiprefs: StorageRole::TableUiprefs.default_table(),
            tracking: StorageRole::Tracking.default_table(),
            userconfig: StorageRole::Userconfig.default_table(),
            recent: StorageRole::Recent.default_table(),
            favorite: StorageRole::Favorite.default_table(),
            users: StorageRole::Users.default_table(),
            usergroups: StorageRole::Usergroups.default_table(),
            navigationhiding: StorageRole::NavigationHiding.default_table(),
            savedsearches: StorageRole::SavedSearches.default_table(),
            central_columns: StorageRole::CentralColumns.default_table(),
            designer_settings: StorageRole::DesignerSettings.default_table(),
            export_templates: StorageRole::ExportTemplates.default_table(),
        }
    }
}

impl StorageTables {
    /// Table name for a role.
    pub fn table(&self, role: StorageRole) -> &str {
        match role {
            StorageRole::Bookmark => &self.bookmark,
            StorageRole::Relation => &self.relation,
            StorageRole::TableInfo => &self.table_info,
            StorageRole::TableCoords => &self.table_coords,
            StorageRole::PdfPages => &self.pdf_pages,
            StorageRole::ColumnInfo => &self.column_info,
            StorageRole::History => &self.history,
            StorageRole::TableUiprefs => &self.table_uiprefs,
            StorageRole::Tracking => &self.tracking,
            StorageRole::Userconfig => &self.userconfig,
            StorageRole::Recent => &self.recent,
            StorageRole::Favorite => &self.favorite,
            StorageRole::Users => &self.users,
            StorageRole::Usergroups => &self.usergroups,
            StorageRole::NavigationHiding => &self.navigationhiding,
            StorageRole::SavedSearches => &self.savedsearches,
            StorageRole::CentralColumns => &self.central_columns,
            StorageRole::DesignerSettings => &self.designer_settings,
            StorageRole::ExportTemplates => &self.export_templates,
        }
    }

    /// `(role, table)` pairs in role order.
    pub fn iter(&self) -> impl Iterator<Item = (StorageRole, &str)> {
        StorageRole::ALL.into_iter().map(|role| (role, self.table(role)))
    }
}
