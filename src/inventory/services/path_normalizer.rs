use crate::inventory::domain::{InventoryItem, Library, ScanResult, Volume};

/// Path separator convention of a volume root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorStyle {
    /// `\`-separated (Windows); scanner `/` separators are rewritten
    Backslash,
    /// `/`-separated; backslashes are legal file name characters and kept
    Slash,
}

impl SeparatorStyle {
    pub fn native() -> Self {
        if cfg!(windows) {
            SeparatorStyle::Backslash
        } else {
            SeparatorStyle::Slash
        }
    }

    /// Style implied by a volume root; `fallback` when the root is ambiguous.
    ///
    /// Drive-letter roots and roots containing `\` are Windows volumes, roots
    /// starting with `/` are Unix volumes, whatever host replays them.
    pub fn for_root(root: &str, fallback: SeparatorStyle) -> Self {
        let mut chars = root.chars();
        let drive_letter = matches!(
            (chars.next(), chars.next()),
            (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
        );

        if drive_letter || root.contains('\\') {
            SeparatorStyle::Backslash
        } else if root.starts_with('/') {
            SeparatorStyle::Slash
        } else {
            fallback
        }
    }

    fn separator(&self) -> char {
        match self {
            SeparatorStyle::Backslash => '\\',
            SeparatorStyle::Slash => '/',
        }
    }

    fn is_separator(&self, c: char) -> bool {
        match self {
            SeparatorStyle::Backslash => c == '\\' || c == '/',
            SeparatorStyle::Slash => c == '/',
        }
    }
}

/// PathNormalizer service rewriting snapshot-relative library paths
///
/// The scanner only ever sees the snapshot mount, so every library path it
/// reports is re-rooted at the origin volume. The result always has exactly
/// one separator between the volume root and the relative part.
#[derive(Debug, Clone, Copy)]
pub struct PathNormalizer {
    style: SeparatorStyle,
}

impl PathNormalizer {
    pub fn new(style: SeparatorStyle) -> Self {
        Self { style }
    }

    pub fn native() -> Self {
        Self::new(SeparatorStyle::native())
    }

    /// Converts one scan result into inventory items rooted at `origin`.
    ///
    /// Libraries come first, then applications, each in scanner order.
    pub fn normalize(&self, scan_result: ScanResult, origin: &Volume) -> Vec<InventoryItem> {
        let ScanResult {
            libraries,
            applications,
        } = scan_result;

        let mut items = Vec::with_capacity(libraries.len() + applications.len());
        items.extend(libraries.into_iter().map(|lib| {
            InventoryItem::Library(Library {
                path: self.rebase(origin, &lib.path),
                ..lib
            })
        }));
        items.extend(applications.into_iter().map(InventoryItem::Application));
        items
    }

    /// Joins `relative` onto the volume root.
    pub fn rebase(&self, origin: &Volume, relative: &str) -> String {
        let style = SeparatorStyle::for_root(origin.root(), self.style);
        let separator = style.separator();
        let cleaned = match style {
            SeparatorStyle::Backslash => relative.replace('/', "\\"),
            SeparatorStyle::Slash => relative.to_string(),
        };
        let cleaned = cleaned.strip_prefix(separator).unwrap_or(cleaned.as_str());

        let root = origin.root();
        if root.ends_with(|c| style.is_separator(c)) {
            format!("{}{}", root, cleaned)
        } else {
            format!("{}{}{}", root, separator, cleaned)
        }
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::native()
    }
}
