//! Writer for the dinver `.param` model-parameterization format.
//!
//! The external inversion tool consumes a gzip-compressed tar archive
//! holding a single `contents.xml` document. The document encodes, per
//! parameter, the layering-strategy tag, the per-layer bound arrays, and
//! the reversal flags. Tag names and nesting are dictated by the target
//! tool version, so each supported version gets its own self-contained
//! rendering function; adding a version means adding a renderer, not
//! editing existing ones.
//!
//! # Output layout (version 2.10.1)
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Dinver>
//!   <pluginTag>DispersionCurve</pluginTag>
//!   <pluginTitle>Surface Wave Inversion</pluginTitle>
//!   <ParamGroundModel>
//!     <ParamProfile>
//!       <shortName>Vs</shortName>
//!       <longName>Shear-wave velocity</longName>
//!       <unit>m/s</unit>
//!       <parType>FTL</parType>
//!       <nLayers>3</nLayers>
//!       <layMin>3 3 3</layMin>
//!       <layMax>3 3 3</layMax>
//!       <parMin>100 100 100</parMin>
//!       <parMax>200 200 200</parMax>
//!       <parRev>true true true</parRev>
//!       <parAddValue>3</parAddValue>
//!     </ParamProfile>
//!     ...
//!   </ParamGroundModel>
//! </Dinver>
//! ```
//!
//! Output is deterministic (gzip and tar timestamps are zeroed), so
//! identical inputs produce byte-identical archives. The archive is
//! staged in a sibling temporary file and renamed into place, so a failed
//! write never leaves a partial file at the target path.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use flate2::write::GzEncoder;
use flate2::{Compression, GzBuilder};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::parameter::Parameter;
use crate::parameterization::Parameterization;

/// Archive member holding the parameterization document.
pub const CONTENTS_NAME: &str = "contents.xml";

/// Error type for `.param` serialization.
#[derive(Debug, Error)]
pub enum ParamFileError {
    /// I/O error while assembling or placing the archive.
    #[error("param file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Version string not in the supported set.
    #[error("unsupported param file version: {0} (supported: 2.10.1, 3.4.2)")]
    UnsupportedVersion(String),
}

/// Supported consumer schema versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Geopsy/dinver 2.10.1.
    V2_10_1,
    /// Geopsy/dinver 3.4.2.
    V3_4_2,
}

impl SchemaVersion {
    /// Version strings accepted by [`FromStr`].
    pub const SUPPORTED: &'static [&'static str] = &["2.10.1", "3.4.2"];

    /// Render `contents.xml` for this schema version.
    pub fn render(self, par: &Parameterization) -> std::io::Result<Vec<u8>> {
        match self {
            SchemaVersion::V2_10_1 => render_v2_10_1(par),
            SchemaVersion::V3_4_2 => render_v3_4_2(par),
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = ParamFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2.10.1" => Ok(SchemaVersion::V2_10_1),
            "3.4.2" => Ok(SchemaVersion::V3_4_2),
            other => Err(ParamFileError::UnsupportedVersion(other.to_string())),
        }
    }
}

/// Serialize a parameterization to `path` as a gzipped tar archive.
///
/// Replaces any existing file at `path`. The write is all-or-nothing:
/// the archive is fully assembled in memory, written to a temporary file
/// in the target directory, and atomically renamed over `path`.
pub fn write_param_file(
    par: &Parameterization,
    path: impl AsRef<Path>,
    version: &str,
) -> Result<(), ParamFileError> {
    let path = path.as_ref();
    let version: SchemaVersion = version.parse()?;
    let xml = version.render(par)?;

    // Zeroed gzip mtime keeps identical inputs byte-identical.
    let encoder: GzEncoder<Vec<u8>> = GzBuilder::new()
        .mtime(0)
        .write(Vec::new(), Compression::default());
    let mut archive = tar::Builder::new(encoder);
    let mut header = tar::Header::new_gnu();
    header.set_size(xml.len() as u64);
    header.set_mode(0o644);
    header.set_mtime(0);
    header.set_uid(0);
    header.set_gid(0);
    archive.append_data(&mut header, CONTENTS_NAME, xml.as_slice())?;
    let bytes = archive.into_inner()?.finish()?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(&bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| ParamFileError::Io(e.error))?;
    Ok(())
}

/// The four profiles in the consumer's expected order.
fn profiles(par: &Parameterization) -> [(&'static str, &'static str, &'static str, &Parameter); 4] {
    [
        ("Vp", "Compression-wave velocity", "m/s", &par.vp),
        ("Pr", "Poisson's ratio", "-", &par.pr),
        ("Vs", "Shear-wave velocity", "m/s", &par.vs),
        ("Rho", "Density", "kg/m3", &par.rh),
    ]
}

/// Renderer for the 2.10.1 consumer schema.
fn render_v2_10_1(par: &Parameterization) -> std::io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new(Vec::new());
    xml.declaration()?;
    xml.start_element("Dinver")?;
    xml.text_element("pluginTag", "DispersionCurve")?;
    xml.text_element("pluginTitle", "Surface Wave Inversion")?;
    xml.start_element("ParamGroundModel")?;
    for (short, long, unit, param) in profiles(par) {
        write_profile(&mut xml, short, long, unit, param, false)?;
    }
    xml.end_element("ParamGroundModel")?;
    xml.end_element("Dinver")?;
    Ok(xml.into_inner())
}

/// Renderer for the 3.4.2 consumer schema: carries the plugin version
/// and an explicit depth/thickness marker per profile.
fn render_v3_4_2(par: &Parameterization) -> std::io::Result<Vec<u8>> {
    let mut xml = XmlWriter::new(Vec::new());
    xml.declaration()?;
    xml.start_element("Dinver")?;
    xml.text_element("pluginTag", "DispersionCurve")?;
    xml.text_element("pluginTitle", "Surface Wave Inversion")?;
    xml.text_element("pluginVersion", "3.4.2")?;
    xml.start_element("ParamGroundModel")?;
    for (short, long, unit, param) in profiles(par) {
        write_profile(&mut xml, short, long, unit, param, true)?;
    }
    xml.end_element("ParamGroundModel")?;
    xml.end_element("Dinver")?;
    Ok(xml.into_inner())
}

/// One `<ParamProfile>` block shared by both renderers.
fn write_profile(
    xml: &mut XmlWriter<Vec<u8>>,
    short: &str,
    long: &str,
    unit: &str,
    param: &Parameter,
    with_is_depth: bool,
) -> std::io::Result<()> {
    xml.start_element("ParamProfile")?;
    xml.text_element("shortName", short)?;
    xml.text_element("longName", long)?;
    xml.text_element("unit", unit)?;
    xml.text_element("parType", param.par_type().tag())?;
    if with_is_depth {
        xml.text_element("isDepth", bool_str(param.par_type().is_depth()))?;
    }
    xml.text_element("nLayers", &param.nlayers().to_string())?;
    xml.text_element("layMin", &join_floats(param.lay_min()))?;
    xml.text_element("layMax", &join_floats(param.lay_max()))?;
    xml.text_element("parMin", &join_floats(param.par_min()))?;
    xml.text_element("parMax", &join_floats(param.par_max()))?;
    xml.text_element("parRev", &join_bools(param.par_rev()))?;
    if let Some(value) = param.par_value() {
        xml.text_element("parValue", &format_float(value))?;
    }
    if let Some(value) = param.par_add_value() {
        xml.text_element("parAddValue", &format_float(value))?;
    }
    xml.end_element("ParamProfile")?;
    Ok(())
}

fn format_float(v: f64) -> String {
    // `{}` prints the shortest representation that parses back exactly.
    format!("{}", v)
}

fn join_floats(values: &[f64]) -> String {
    let mut out = String::new();
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", v);
    }
    out
}

fn bool_str(v: bool) -> &'static str {
    if v {
        "true"
    } else {
        "false"
    }
}

fn join_bools(values: &[bool]) -> String {
    values
        .iter()
        .map(|&v| bool_str(v))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Minimal indenting XML writer.
struct XmlWriter<W: Write> {
    writer: W,
    indent: usize,
}

impl<W: Write> XmlWriter<W> {
    fn new(writer: W) -> Self {
        Self { writer, indent: 0 }
    }

    fn write_indent(&mut self) -> std::io::Result<()> {
        for _ in 0..self.indent {
            write!(self.writer, "  ")?;
        }
        Ok(())
    }

    fn declaration(&mut self) -> std::io::Result<()> {
        writeln!(self.writer, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")
    }

    fn start_element(&mut self, name: &str) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(self.writer, "<{}>", name)?;
        self.indent += 1;
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> std::io::Result<()> {
        self.indent -= 1;
        self.write_indent()?;
        writeln!(self.writer, "</{}>", name)?;
        Ok(())
    }

    fn text_element(&mut self, name: &str, text: &str) -> std::io::Result<()> {
        self.write_indent()?;
        writeln!(self.writer, "<{}>{}</{}>", name, text, name)?;
        Ok(())
    }
}

impl XmlWriter<Vec<u8>> {
    fn into_inner(self) -> Vec<u8> {
        self.writer
    }
}
