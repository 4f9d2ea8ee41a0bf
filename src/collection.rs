use crate::error::{ImporterError, Result};
use crate::types::RecordQuery;
use tracing::{debug, info};

/// Loads a record collection from a CSV file. The file must include columns
/// named Artist, Title, and Year (case-sensitive); extra columns are ignored.
/// The first `skip` data rows are dropped. Zero rows after skip is a valid
/// empty result; the caller decides whether that is fatal.
pub fn read_collection(filename: &str, skip: usize) -> Result<Vec<RecordQuery>> {
    let mut reader = csv::Reader::from_path(filename)?;
    let headers = reader.headers()?.clone();

    let artist_col = required_column(&headers, "Artist")?;
    let title_col = required_column(&headers, "Title")?;
    let year_col = required_column(&headers, "Year")?;

    let mut collection = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        if row < skip {
            debug!("Skipping row {}", row + 1);
            continue;
        }
        collection.push(RecordQuery::new(
            record.get(artist_col).unwrap_or("").to_string(),
            record.get(title_col).unwrap_or("").to_string(),
            record.get(year_col).unwrap_or("").to_string(),
        ));
    }

    info!("Loaded {} records from {}", collection.len(), filename);
    Ok(collection)
}

fn required_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|header| header == name)
        .ok_or_else(|| ImporterError::MissingColumn(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(contents: &str) -> (TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("collection.csv");
        fs::write(&path, contents).unwrap();
        let path = path.to_str().unwrap().to_string();
        (dir, path)
    }

    #[test]
    fn reads_records_in_file_order() {
        let (_dir, path) = write_csv(
            "Artist,Title,Year\n\
             Nirvana,Nevermind,1991\n\
             Pixies,Doolittle,1989\n",
        );
        let collection = read_collection(&path, 0).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection[0].artist, "Nirvana");
        assert_eq!(collection[0].title, "Nevermind");
        assert_eq!(collection[0].year, "1991");
        assert_eq!(collection[1].artist, "Pixies");
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let (_dir, path) = write_csv("Artist,Title\nNirvana,Nevermind\n");
        let err = read_collection(&path, 0).unwrap_err();
        assert!(matches!(err, ImporterError::MissingColumn(col) if col == "Year"));
    }

    #[test]
    fn column_names_are_case_sensitive() {
        let (_dir, path) = write_csv("artist,title,year\nNirvana,Nevermind,1991\n");
        let err = read_collection(&path, 0).unwrap_err();
        assert!(matches!(err, ImporterError::MissingColumn(col) if col == "Artist"));
    }

    #[test]
    fn skip_drops_exactly_the_first_rows() {
        let (_dir, path) = write_csv(
            "Artist,Title,Year\n\
             Nirvana,Nevermind,1991\n\
             Pixies,Doolittle,1989\n\
             Sleater-Kinney,Dig Me Out,1997\n",
        );
        let collection = read_collection(&path, 2).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].artist, "Sleater-Kinney");
    }

    #[test]
    fn skip_past_the_end_yields_empty() {
        let (_dir, path) = write_csv(
            "Artist,Title,Year\n\
             Nirvana,Nevermind,1991\n",
        );
        let collection = read_collection(&path, 5).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn extra_columns_are_ignored() {
        let (_dir, path) = write_csv(
            "Catalog,Artist,Format,Title,Year\n\
             DGC-24425,Nirvana,LP,Nevermind,1991\n",
        );
        let collection = read_collection(&path, 0).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection[0].artist, "Nirvana");
        assert_eq!(collection[0].title, "Nevermind");
        assert_eq!(collection[0].year, "1991");
        assert_eq!(collection[0].kind, "release");
        assert_eq!(collection[0].country, "US");
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let (_dir, path) = write_csv(
            "Artist,Title,Year\n\
             \"Crosby, Stills & Nash\",\"Crosby, Stills & Nash\",1969\n",
        );
        let collection = read_collection(&path, 0).unwrap();
        assert_eq!(collection[0].artist, "Crosby, Stills & Nash");
    }
}
