use super::MeasurementRecord;
use crate::error::{Result, WeatherError};
use csv::StringRecord;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header names accepted for each required column, in record field order
const COLUMNS: [(&str, &[&str]); 10] = [
    ("weather_group", &["weather_group", "station", "station_index"]),
    ("time", &["time", "unix_time", "period_end_unix"]),
    ("dhi", &["dhi"]),
    ("dni", &["dni"]),
    ("ghi", &["ghi"]),
    ("wind_ns", &["wind_ns", "wind_speed_ns"]),
    ("wind_ew", &["wind_ew", "wind_speed_ew"]),
    ("air_temp", &["air_temp"]),
    ("surface_pressure", &["surface_pressure"]),
    ("air_density", &["air_density"]),
];

/// Reader for one weather CSV file
#[derive(Debug, Clone)]
pub struct WeatherRecordSource {
    pub path: PathBuf,
}

impl WeatherRecordSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse every data row of the file, preserving file order
    pub fn read_records(&self) -> Result<Vec<MeasurementRecord>> {
        let file = File::open(&self.path).map_err(|e| WeatherError::io(&self.path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader.headers().map_err(|e| self.csv_error(e))?.clone();
        let columns = self.locate_columns(&headers)?;

        let mut records = Vec::new();
        let mut row = StringRecord::new();
        while reader.read_record(&mut row).map_err(|e| self.csv_error(e))? {
            records.push(self.parse_row(&row, &columns, records.len() + 1)?);
        }

        debug!(
            "Read {} weather rows from {}",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }

    fn locate_columns(&self, headers: &StringRecord) -> Result<[usize; 10]> {
        let mut indices = [0usize; 10];
        for (slot, (name, aliases)) in indices.iter_mut().zip(COLUMNS.iter()) {
            *slot = headers
                .iter()
                .position(|h| {
                    let h = h.trim().to_ascii_lowercase();
                    aliases.iter().any(|alias| *alias == h)
                })
                .ok_or_else(|| WeatherError::MissingColumn {
                    path: self.path.clone(),
                    column: *name,
                })?;
        }
        Ok(indices)
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        columns: &[usize; 10],
        row_number: usize,
    ) -> Result<MeasurementRecord> {
        let mut fields = [0.0f64; 10];
        for (k, (value, &col)) in fields.iter_mut().zip(columns.iter()).enumerate() {
            let raw = row.get(col).unwrap_or("");
            *value = raw.parse().map_err(|_| WeatherError::InvalidField {
                path: self.path.clone(),
                row: row_number,
                column: COLUMNS[k].0,
                value: raw.to_string(),
            })?;
        }

        let [station_index, time, dhi, dni, ghi, wind_ns, wind_ew, air_temp, surface_pressure, air_density] =
            fields;
        Ok(MeasurementRecord {
            station_index,
            time,
            dhi,
            dni,
            ghi,
            wind_ns,
            wind_ew,
            air_temp,
            surface_pressure,
            air_density,
        })
    }

    fn csv_error(&self, source: csv::Error) -> WeatherError {
        WeatherError::Csv {
            path: self.path.clone(),
            source,
        }
    }
}

/// Convenience wrapper around `WeatherRecordSource::read_records`
pub fn read_weather_csv(path: impl AsRef<Path>) -> Result<Vec<MeasurementRecord>> {
    WeatherRecordSource::new(path).read_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let file = write_csv(
            "weather_group,time,dhi,dni,ghi,wind_ns,wind_ew,air_temp,surface_pressure,air_density\n\
             0,100,10,20,300,1.0,2.0,25.0,1010.0,1.2\n\
             1,100,11,21,310,1.1,2.1,25.5,1011.0,1.21\n",
        );
        let records = read_weather_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].station_index, 0.0);
        assert_eq!(records[1].ghi, 310.0);
        assert_eq!(records[1].air_density, 1.21);
    }

    #[test]
    fn test_aliases_extra_columns_and_reordering() {
        let file = write_csv(
            "Period_End_Unix, station ,notes,GHI,DHI,DNI,wind_speed_ew,wind_speed_ns,air_temp,air_density,surface_pressure\n\
             500,4,sunny,900,50,800,-3.0,4.0,30.0,1.1,1005.0\n",
        );
        let records = read_weather_csv(file.path()).unwrap();
        let r = records[0];
        assert_eq!(r.time, 500.0);
        assert_eq!(r.station_index, 4.0);
        assert_eq!(r.ghi, 900.0);
        assert_eq!(r.wind_ns, 4.0);
        assert_eq!(r.wind_ew, -3.0);
        assert_eq!(r.surface_pressure, 1005.0);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let file = write_csv("weather_group,time,dhi,dni,ghi\n0,0,0,0,0\n");
        let err = read_weather_csv(file.path()).unwrap_err();
        assert!(matches!(
            err,
            WeatherError::MissingColumn { column: "wind_ns", .. }
        ));
    }

    #[test]
    fn test_invalid_field_names_row_and_column() {
        let file = write_csv(
            "weather_group,time,dhi,dni,ghi,wind_ns,wind_ew,air_temp,surface_pressure,air_density\n\
             0,100,10,20,300,1.0,2.0,25.0,1010.0,1.2\n\
             1,100,11,21,n/a,1.1,2.1,25.5,1011.0,1.21\n",
        );
        match read_weather_csv(file.path()).unwrap_err() {
            WeatherError::InvalidField {
                row, column, value, ..
            } => {
                assert_eq!(row, 2);
                assert_eq!(column, "ghi");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_weather_csv("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, WeatherError::Io { .. }));
    }
}
