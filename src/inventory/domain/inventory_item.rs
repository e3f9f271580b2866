/// Library discovered by the scanner (a package inside some ecosystem)
///
/// `path` is relative to the snapshot mount while the scan result is fresh,
/// and absolute (rooted at the origin volume) after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub path: String,
    pub name: String,
    pub version: String,
    pub ecosystem: Option<String>,
}

impl Library {
    pub fn new(path: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            version: version.into(),
            ecosystem: None,
        }
    }

    pub fn with_ecosystem(mut self, ecosystem: impl Into<String>) -> Self {
        self.ecosystem = Some(ecosystem.into());
        self
    }
}

/// Installed application reported by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    pub version: String,
    pub vendor: Option<String>,
}

impl Application {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            vendor: None,
        }
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }
}

/// A single piece of installed software
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryItem {
    Library(Library),
    Application(Application),
}

impl InventoryItem {
    pub fn name(&self) -> &str {
        match self {
            InventoryItem::Library(lib) => &lib.name,
            InventoryItem::Application(app) => &app.name,
        }
    }

    pub fn version(&self) -> &str {
        match self {
            InventoryItem::Library(lib) => &lib.version,
            InventoryItem::Application(app) => &app.version,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            InventoryItem::Library(lib) => Some(&lib.path),
            InventoryItem::Application(_) => None,
        }
    }
}

impl From<Library> for InventoryItem {
    fn from(lib: Library) -> Self {
        InventoryItem::Library(lib)
    }
}

impl From<Application> for InventoryItem {
    fn from(app: Application) -> Self {
        InventoryItem::Application(app)
    }
}

/// Raw result of one scanner invocation against one mount path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub libraries: Vec<Library>,
    pub applications: Vec<Application>,
}

impl ScanResult {
    pub fn new(libraries: Vec<Library>, applications: Vec<Application>) -> Self {
        Self {
            libraries,
            applications,
        }
    }

    pub fn item_count(&self) -> usize {
        self.libraries.len() + self.applications.len()
    }
}

/// Append-only union of inventory items across successfully scanned volumes
///
/// Insertion order is preserved and nothing is merged, so the same library
/// found on two volumes appears twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedInventory {
    items: Vec<InventoryItem>,
}

impl AggregatedInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, items: Vec<InventoryItem>) {
        self.items.extend(items);
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn libraries(&self) -> impl Iterator<Item = &Library> {
        self.items.iter().filter_map(|item| match item {
            InventoryItem::Library(lib) => Some(lib),
            InventoryItem::Application(_) => None,
        })
    }

    pub fn applications(&self) -> impl Iterator<Item = &Application> {
        self.items.iter().filter_map(|item| match item {
            InventoryItem::Application(app) => Some(app),
            InventoryItem::Library(_) => None,
        })
    }
}

impl FromIterator<InventoryItem> for AggregatedInventory {
    fn from_iter<T: IntoIterator<Item = InventoryItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
