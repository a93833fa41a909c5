//! Drawing parts and the floating-object anchors they contain.
//!
//! Drawing parts are small, so each one is parsed into a namespace-aware tree
//! and queried directly rather than streamed.
use crate::helpers::zip::ZipHelper;
use roxmltree::Document;
use roxmltree::Node;
use std::io::Read;
use std::io::Seek;
use zip::ZipArchive;

/// XML namespaces used by drawing parts, declared once for the whole pipeline.
pub(crate) mod ns {
    /// SpreadsheetML drawing (`xdr:`): anchors and their positions
    pub(crate) const XDR: &str = "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing";
    /// DrawingML main (`a:`): the `blip` image fill
    pub(crate) const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
    /// Office document relationships (`r:`): the `embed` reference id
    pub(crate) const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
}

/// Directory holding the drawing parts of a spreadsheet package.
pub(crate) const DRAWINGS_DIR: &str = "xl/drawings/";

/// Drawing-space units per typographic point.
pub(crate) const EMU_PER_POINT: f64 = 12700.0;

/// Placement kind of a floating drawing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum AnchorKind {
    OneCell,
    TwoCell,
    Absolute,
}

impl AnchorKind {
    fn from_local_name(name: &str) -> Option<Self> {
        match name {
            "oneCellAnchor" => Some(Self::OneCell),
            "twoCellAnchor" => Some(Self::TwoCell),
            "absoluteAnchor" => Some(Self::Absolute),
            _ => None,
        }
    }
}

/// Raw vertical position of an anchor, before any row geometry is applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum AnchorPosition {
    /// Zero-based origin row plus an offset into it, in drawing units
    CellRelative { row: usize, offset: i64 },
    /// Distance from the top of the sheet, in drawing units
    Absolute { y: i64 },
}

/// One anchor element of a parsed drawing part.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Anchor<'a, 'input> {
    pub(crate) kind: AnchorKind,
    node: Node<'a, 'input>,
}

impl<'a, 'input> Anchor<'a, 'input> {
    /// Reads the anchor's vertical position, `None` if its fields are absent or unparsable.
    ///
    /// Two-cell anchors use their `from` cell (`row` and `rowOff`). One-cell and
    /// absolute anchors need an explicit `y` coordinate: `from/y` when the anchor
    /// has a `from` element, otherwise `pos@y` or `pos/y`.
    pub(crate) fn position(&self) -> Option<AnchorPosition> {
        let from = child(self.node, "from");
        if self.kind == AnchorKind::TwoCell {
            return cell_position(from?);
        }
        let y = match from {
            Some(from) => parse_text(child(from, "y")?)?,
            None => {
                let pos = child(self.node, "pos")?;
                match pos.attribute("y") {
                    Some(value) => value.trim().parse().ok()?,
                    None => parse_text(child(pos, "y")?)?,
                }
            }
        };
        Some(AnchorPosition::Absolute { y })
    }

    /// Relationship id of the embedded picture (`a:blip/@r:embed`).
    pub(crate) fn embed_id(&self) -> Option<&'a str> {
        self.node
            .descendants()
            .find(|node| node.has_tag_name((ns::A, "blip")))?
            .attribute((ns::R, "embed"))
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// A parsed drawing part.
pub(crate) struct DrawingPart<'input> {
    pub(crate) path: String,
    document: Document<'input>,
}

impl<'input> DrawingPart<'input> {
    /// Parses a drawing part; empty or malformed content is an error.
    pub(crate) fn parse(path: &str, xml: &'input str) -> Result<Self, roxmltree::Error> {
        let document = Document::parse(xml)?;
        Ok(Self {
            path: path.to_owned(),
            document,
        })
    }

    /// Every supported anchor anywhere in the part, in document order.
    pub(crate) fn anchors(&self) -> Vec<Anchor<'_, 'input>> {
        self.document
            .descendants()
            .filter(|node| node.is_element() && node.tag_name().namespace() == Some(ns::XDR))
            .filter_map(|node| {
                let kind = AnchorKind::from_local_name(node.tag_name().name())?;
                Some(Anchor { kind, node })
            })
            .collect()
    }
}

/// Whether a package entry is a drawing part rather than one of its companions.
pub(crate) fn is_drawing_part(path: &str) -> bool {
    path.strip_prefix(DRAWINGS_DIR)
        .map(|name| !name.is_empty() && !name.starts_with("_rels/") && !name.ends_with('/'))
        .unwrap_or(false)
}

/// Drawing parts of a package, sorted by path.
pub(crate) fn drawing_part_paths<RS: Read + Seek>(zip: &ZipArchive<RS>) -> Vec<String> {
    zip.file_names_under(DRAWINGS_DIR)
        .into_iter()
        .filter(|path| is_drawing_part(path))
        .collect()
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name((ns::XDR, name)))
}

fn parse_text<T: std::str::FromStr>(node: Node<'_, '_>) -> Option<T> {
    node.text()?.trim().parse().ok()
}

fn cell_position(from: Node<'_, '_>) -> Option<AnchorPosition> {
    let row = parse_text(child(from, "row")?)?;
    let offset = parse_text(child(from, "rowOff")?)?;
    Some(AnchorPosition::CellRelative { row, offset })
}
