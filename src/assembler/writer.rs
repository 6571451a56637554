//! Writes a project as SWMM input text
//!
//! Sections always appear in the same order, separated by one blank line.
//! `[TITLE]` and `[OPTIONS]` are always written; every other section only
//! when it has content.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Result, SwmmingError};
use crate::models::{write_block, write_section, SectionBlock, TableRecord};
use crate::project::Project;

/// Assembler for a single project
pub struct InpAssembler<'a> {
    project: &'a Project,
}

/// Stream wrapper inserting the blank line between sections
struct SectionStream<'w, W: Write> {
    inner: &'w mut W,
    written: usize,
}

impl<'w, W: Write> SectionStream<'w, W> {
    fn new(inner: &'w mut W) -> Self {
        Self { inner, written: 0 }
    }

    fn separate(&mut self) -> Result<()> {
        if self.written > 0 {
            self.inner.write_all(b"\n")?;
        }
        self.written += 1;
        Ok(())
    }

    fn table<T: TableRecord>(&mut self, records: &[T]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        self.separate()?;
        write_section(self.inner, records)?;
        debug!(
            "Wrote {} with {} record(s)",
            T::HEADER.lines().next().unwrap_or_default(),
            records.len()
        );
        Ok(())
    }

    fn block<B: SectionBlock>(&mut self, block: Option<&B>) -> Result<()> {
        let Some(block) = block else {
            return Ok(());
        };
        self.separate()?;
        write_block(self.inner, block)?;
        debug!("Wrote {}", B::SECTION);
        Ok(())
    }
}

impl<'a> InpAssembler<'a> {
    /// Create an assembler for `project`
    pub fn new(project: &'a Project) -> Self {
        Self { project }
    }

    /// Validate every record, then write the input file to `stream`
    pub fn write_to<W: Write>(&self, stream: &mut W) -> Result<()> {
        let p = self.project;
        p.validate()?;

        let mut out = SectionStream::new(stream);
        out.block(Some(&p.title))?;
        out.block(Some(&p.options))?;
        out.block(p.evaporation.as_ref())?;
        out.block(p.temperature.as_ref())?;
        out.table(&p.raingages)?;
        out.table(&p.subcatchments)?;
        out.table(&p.subareas)?;
        out.table(&p.infiltration)?;
        out.table(&p.junctions)?;
        out.table(&p.outfalls)?;
        out.table(&p.dividers)?;
        out.table(&p.conduits)?;
        out.table(&p.pumps)?;
        out.table(&p.orifices)?;
        out.table(&p.weirs)?;
        out.table(&p.outlets)?;
        out.table(&p.xsections)?;
        out.table(&p.transects)?;
        out.table(&p.timeseries)?;
        out.table(&p.curves)?;
        out.table(&p.patterns)?;
        out.table(&p.streets)?;
        out.table(&p.inlets)?;
        out.table(&p.inlet_usages)?;
        out.block(p.map.as_ref())?;
        out.table(&p.coordinates)?;
        out.table(&p.vertices)?;
        out.table(&p.polygons)?;
        out.table(&p.symbols)?;
        out.block(p.report.as_ref())?;

        stream.flush()?;
        Ok(())
    }

    /// Assemble into a `String`
    pub fn to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| SwmmingError::Other(e.to_string()))
    }

    /// Atomically write the input file to `path`
    ///
    /// The text goes to a temporary file next to `path` which then replaces
    /// the destination. Returns the hex SHA-256 digest of the written bytes.
    pub fn write_file(&self, path: &Path) -> Result<String> {
        let content = self.to_string()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(content.as_bytes())?;
        temp.flush()?;
        temp.persist(path).map_err(|e| e.error)?;

        let digest = digest(&content);
        info!("Assembled {} ({} bytes)", path.display(), content.len());
        debug!("sha256 {}", digest);
        Ok(digest)
    }
}

/// Hex SHA-256 digest of assembled text
pub fn digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Write `project` as a SWMM input file to `stream`
pub fn assemble_inp<W: Write>(stream: &mut W, project: &Project) -> Result<()> {
    InpAssembler::new(project).write_to(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;
    use crate::models::*;
    use tempfile::TempDir;

    fn section_names(text: &str) -> Vec<&str> {
        text.lines().filter(|l| l.starts_with('[')).collect()
    }

    #[test]
    fn test_base_inp() {
        let project = Project::new();
        let text = InpAssembler::new(&project).to_string().unwrap();

        assert_eq!(
            text,
            format!("{}\n{}", Title::default().to_inp(), Options::default().to_inp())
        );
        assert!(text.starts_with(
            "[TITLE]\n;;Project Title/Notes\nProject Title\nProject Description\n\n[OPTIONS]\n"
        ));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_conduit_project() {
        let project = conduit_project();
        let text = InpAssembler::new(&project).to_string().unwrap();

        assert_eq!(
            section_names(&text),
            vec![
                "[TITLE]",
                "[OPTIONS]",
                "[JUNCTIONS]",
                "[OUTFALLS]",
                "[CONDUITS]",
                "[XSECTIONS]",
                "[MAP]",
                "[COORDINATES]",
                "[VERTICES]",
            ]
        );
        assert!(text.contains(&format!("\n\n{}\n", section_to_string(&project.conduits))));
        assert!(text.contains(
            "\n\n[MAP]\nDIMENSIONS -50.00 -50.00 300.00 150.00\nUNITS     METERS\n\n[COORDINATES]\n"
        ));
        assert!(text.ends_with("c2               150.000            50.000            \n"));
    }

    #[test]
    fn test_street_project() {
        let project = street_project();
        let text = InpAssembler::new(&project).to_string().unwrap();

        assert_eq!(
            section_names(&text)[2..],
            [
                "[JUNCTIONS]",
                "[OUTFALLS]",
                "[CONDUITS]",
                "[XSECTIONS]",
                "[STREETS]",
                "[INLETS]",
                "[INLET_USAGE]",
            ]
        );
        assert!(text.contains("FLOW_UNITS           LPS\n"));
        assert!(text.contains("conduit2         STREET       street1         \n"));
    }

    #[test]
    fn test_transect_project() {
        let project = transect_project();
        let text = InpAssembler::new(&project).to_string().unwrap();

        assert_eq!(
            section_names(&text)[2..],
            [
                "[JUNCTIONS]",
                "[OUTFALLS]",
                "[CONDUITS]",
                "[XSECTIONS]",
                "[TRANSECTS]",
            ]
        );
        assert!(text.contains(
            "c1               IRREGULAR    transect1       \n\
             c2               IRREGULAR    transect2       \n\
             \n\
             [TRANSECTS]\n"
        ));
    }

    #[test]
    fn test_subcatchment_project() {
        let project = subcatchment_project();
        let text = InpAssembler::new(&project).to_string().unwrap();

        assert_eq!(
            section_names(&text)[2..],
            [
                "[RAINGAGES]",
                "[SUBCATCHMENTS]",
                "[SUBAREAS]",
                "[INFILTRATION]",
                "[JUNCTIONS]",
                "[TIMESERIES]",
                "[MAP]",
                "[COORDINATES]",
                "[POLYGONS]",
            ]
        );
        assert!(text.ends_with(
            "[POLYGONS]\n\
             ;;Subcatchment   X-Coord            Y-Coord           \n\
             ;;-------------- ------------------ ------------------\n\
             s1               0.000              0.000             \n\
             s1               10.000             0.000             \n\
             s1               10.000             10.000            \n\
             s1               6.000              10.000            \n\
             s1               6.000              4.000             \n\
             s1               0.000              4.000             \n\
             s1               0.000              0.000             \n\
             s2               20.000             20.000            \n\
             s2               15.000             18.000            \n\
             s2               21.000             14.000            \n"
        ));
        assert!(text.contains(
            "[COORDINATES]\n\
             ;;Node           X-Coord            Y-Coord           \n\
             ;;-------------- ------------------ ------------------\n\
             j1               5.000              15.000            \n"
        ));
    }

    fn opens_with_section<B: SectionBlock>(block: &B) -> bool {
        block.to_inp().lines().next() == Some(B::SECTION)
    }

    #[test]
    fn test_block_section_names() {
        assert!(opens_with_section(&Title::default()));
        assert!(opens_with_section(&Options::default()));
        assert!(opens_with_section(&Report::default()));
        assert!(opens_with_section(&Temperature::default()));
        assert!(opens_with_section(&Map::new([0.0, 0.0, 1.0, 1.0], MapUnits::None)));
        assert!(opens_with_section(&Evaporation::new(EvaporationSource::Constant {
            rate: 0.1
        })));
    }

    #[test]
    fn test_report_is_last() {
        let mut project = conduit_project();
        project.report = Some(Report::default());
        let text = InpAssembler::new(&project).to_string().unwrap();
        assert_eq!(section_names(&text).last(), Some(&"[REPORT]"));
    }

    #[test]
    fn test_invalid_project_writes_nothing() {
        let mut project = conduit_project();
        project.junctions[0].max_depth = -1.0;

        let mut buffer = Vec::new();
        assert!(assemble_inp(&mut buffer, &project).is_err());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_write_file_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("conduit.inp");
        let project = conduit_project();
        let assembler = InpAssembler::new(&project);

        let first = assembler.write_file(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, assembler.to_string().unwrap());
        assert_eq!(first, digest(&written));
        assert_eq!(first.len(), 64);

        fs::write(&path, "stale").unwrap();
        assert_eq!(assembler.write_file(&path).unwrap(), first);
        assert_eq!(fs::read_to_string(&path).unwrap(), written);
    }
}
