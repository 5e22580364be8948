//! # VOTable reader
//!
//! Gator answers catalog queries (`outfmt=3`) with a VOTable document:
//!
//! ```text
//! VOTABLE
//! └── RESOURCE
//!     ├── INFO  (name="QUERY_STATUS" value="OK" | "ERROR")
//!     └── TABLE
//!         ├── FIELD*  (name, datatype, unit, ucd, DESCRIPTION)
//!         └── DATA
//!             └── TABLEDATA
//!                 └── TR*
//!                     └── TD*
//! ```
//!
//! [`parse_votable`] deserializes the document with `quick-xml` and flattens the first
//! `TABLE` into a [`Table`]: field metadata plus rows of cell text. Cells are kept as text;
//! typed access goes through [`Table::column_f64`].

use std::str::FromStr;

use quick_xml::de::from_str;
use serde::Deserialize;

use crate::irsa_errors::IrsaError;

#[derive(Debug, Deserialize)]
struct VoTableDocument {
    #[serde(rename = "INFO", default)]
    infos: Vec<Info>,

    #[serde(rename = "RESOURCE", default)]
    resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct Resource {
    #[serde(rename = "INFO", default)]
    infos: Vec<Info>,

    #[serde(rename = "TABLE", default)]
    tables: Vec<TableElement>,
}

#[derive(Debug, Deserialize)]
struct Info {
    #[serde(rename = "@name")]
    name: String,

    #[serde(rename = "@value", default)]
    value: String,

    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct TableElement {
    #[serde(rename = "FIELD", default)]
    fields: Vec<FieldElement>,

    #[serde(rename = "DATA")]
    data: Option<Data>,
}

#[derive(Debug, Deserialize)]
struct FieldElement {
    #[serde(rename = "@name")]
    name: String,

    #[serde(rename = "@datatype", default)]
    datatype: String,

    #[serde(rename = "@unit")]
    unit: Option<String>,

    #[serde(rename = "@ucd")]
    ucd: Option<String>,

    #[serde(rename = "DESCRIPTION")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "TABLEDATA")]
    table_data: Option<TableData>,
}

#[derive(Debug, Deserialize)]
struct TableData {
    #[serde(rename = "TR", default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "TD", default)]
    cells: Vec<String>,
}

/// Column metadata of a result table.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub datatype: String,
    pub unit: Option<String>,
    pub ucd: Option<String>,
    pub description: Option<String>,
}

impl From<FieldElement> for Field {
    fn from(field: FieldElement) -> Self {
        Field {
            name: field.name,
            datatype: field.datatype,
            unit: field.unit,
            ucd: field.ucd,
            description: field.description,
        }
    }
}

/// Rows × named columns parsed from a VOTable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    fields: Vec<Field>,
    rows: Vec<Vec<String>>,
    infos: Vec<(String, String)>,
}

impl Table {
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Cell text at (`row`, `column`).
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Numeric view of a column; empty cells are `None`.
    ///
    /// Return
    /// ----------
    /// * [`IrsaError::TableParse`] if the column does not exist or a cell is not a number.
    pub fn column_f64(&self, name: &str) -> Result<Vec<Option<f64>>, IrsaError> {
        let cells = self
            .column(name)
            .ok_or_else(|| IrsaError::TableParse(format!("no column named {name}")))?;
        cells
            .into_iter()
            .map(|cell| match cell.trim() {
                "" => Ok(None),
                text => f64::from_str(text).map(Some).map_err(|_| {
                    IrsaError::TableParse(format!("column {name}: {text:?} is not a number"))
                }),
            })
            .collect()
    }

    /// Value of the `INFO` element called `name`, if the document carried one.
    pub fn info(&self, name: &str) -> Option<&str> {
        self.infos
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a VOTable document into a [`Table`].
///
/// Arguments
/// -----------------
/// * `xml`: the full document text.
///
/// Return
/// ----------
/// * The first `TABLE` of the document.
/// * [`IrsaError::QueryStatus`] if an `INFO name="QUERY_STATUS"` reports `ERROR`.
/// * [`IrsaError::VoTableDeserialize`] if the XML is malformed,
///   [`IrsaError::TableParse`] if there is no table or a row does not match the fields.
pub fn parse_votable(xml: &str) -> Result<Table, IrsaError> {
    let document: VoTableDocument = from_str(xml)?;

    let mut infos: Vec<Info> = document.infos;
    let mut tables = Vec::new();
    for resource in document.resources {
        infos.extend(resource.infos);
        tables.extend(resource.tables);
    }

    if let Some(status) = infos
        .iter()
        .find(|info| info.name == "QUERY_STATUS" && info.value == "ERROR")
    {
        let message = status.text.trim();
        return Err(IrsaError::QueryStatus(if message.is_empty() {
            status.value.clone()
        } else {
            message.to_string()
        }));
    }

    let table = tables
        .into_iter()
        .next()
        .ok_or_else(|| IrsaError::TableParse("no TABLE element in the VOTable".into()))?;

    let fields: Vec<Field> = table.fields.into_iter().map(Field::from).collect();
    let rows: Vec<Vec<String>> = table
        .data
        .and_then(|data| data.table_data)
        .map(|table_data| table_data.rows.into_iter().map(|r| r.cells).collect())
        .unwrap_or_default();

    if let Some((idx, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != fields.len())
    {
        return Err(IrsaError::TableParse(format!(
            "row {idx} has {} cells, expected {}",
            row.len(),
            fields.len()
        )));
    }

    Ok(Table {
        fields,
        rows,
        infos: infos.into_iter().map(|info| (info.name, info.value)).collect(),
    })
}

#[cfg(test)]
mod votable_test {
    use super::*;

    const SMALL_TABLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VOTABLE version="1.1">
  <RESOURCE>
    <INFO name="QUERY_STATUS" value="OK"/>
    <TABLE>
      <FIELD name="designation" datatype="char" ucd="meta.id;meta.main">
        <DESCRIPTION>source designation</DESCRIPTION>
      </FIELD>
      <FIELD name="ra" datatype="double" unit="deg" ucd="pos.eq.ra;meta.main"/>
      <FIELD name="j_m" datatype="double" unit="mag"/>
      <DATA>
        <TABLEDATA>
          <TR><TD>00424433+4116074</TD><TD>10.684708</TD><TD>4.353</TD></TR>
          <TR><TD>00424300+4117120</TD><TD>10.679167</TD><TD></TD></TR>
        </TABLEDATA>
      </DATA>
    </TABLE>
  </RESOURCE>
</VOTABLE>"#;

    #[test]
    fn test_parse_votable() {
        let table = parse_votable(SMALL_TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_names(), vec!["designation", "ra", "j_m"]);
        assert_eq!(table.get(0, "designation"), Some("00424433+4116074"));
        assert_eq!(table.get(1, "ra"), Some("10.679167"));
        assert_eq!(table.info("QUERY_STATUS"), Some("OK"));

        let ra = &table.fields()[1];
        assert_eq!(ra.datatype, "double");
        assert_eq!(ra.unit.as_deref(), Some("deg"));
        assert_eq!(
            table.fields()[0].description.as_deref(),
            Some("source designation")
        );
    }

    #[test]
    fn test_column_f64() {
        let table = parse_votable(SMALL_TABLE).unwrap();
        assert_eq!(table.column_f64("j_m").unwrap(), vec![Some(4.353), None]);
        assert!(table.column_f64("designation").is_err());
        assert!(table.column_f64("h_m").is_err());
    }

    #[test]
    fn test_query_status_error() {
        let xml = r#"<VOTABLE><RESOURCE>
            <INFO name="QUERY_STATUS" value="ERROR">Invalid catalog name</INFO>
        </RESOURCE></VOTABLE>"#;
        assert_eq!(
            parse_votable(xml),
            Err(IrsaError::QueryStatus("Invalid catalog name".into()))
        );
    }

    #[test]
    fn test_missing_table() {
        let xml = r#"<VOTABLE><RESOURCE><INFO name="QUERY_STATUS" value="OK"/></RESOURCE></VOTABLE>"#;
        assert_eq!(
            parse_votable(xml),
            Err(IrsaError::TableParse("no TABLE element in the VOTable".into()))
        );
    }

    #[test]
    fn test_empty_table() {
        let xml = r#"<VOTABLE><RESOURCE><TABLE>
            <FIELD name="ra" datatype="double"/>
            <DATA><TABLEDATA></TABLEDATA></DATA>
        </TABLE></RESOURCE></VOTABLE>"#;
        let table = parse_votable(xml).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names(), vec!["ra"]);
    }

    #[test]
    fn test_ragged_row() {
        let xml = r#"<VOTABLE><RESOURCE><TABLE>
            <FIELD name="ra" datatype="double"/>
            <FIELD name="dec" datatype="double"/>
            <DATA><TABLEDATA><TR><TD>1.0</TD></TR></TABLEDATA></DATA>
        </TABLE></RESOURCE></VOTABLE>"#;
        assert_eq!(
            parse_votable(xml),
            Err(IrsaError::TableParse("row 0 has 1 cells, expected 2".into()))
        );
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            parse_votable("<VOTABLE><RESOURCE>"),
            Err(IrsaError::VoTableDeserialize(_))
        ));
    }
}
