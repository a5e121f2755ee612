//! CSV loading into the working set of monsters.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use crate::monster::{Monster, MonsterRow, normalize};

/// Failure to load the monster file. Field-level parse failures are not
/// errors; only an unreadable or structurally broken file is.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open monster file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse monster file {}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

/// The committed working set: every monster has a finite challenge rating.
#[derive(Debug, Clone, Default)]
pub struct Bestiary {
    monsters: Vec<Monster>,
    rows_read: usize,
}

impl Bestiary {
    /// Loads and normalizes a monster CSV file.
    pub fn from_path<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let bestiary = Self::from_reader(io::BufReader::new(file)).map_err(|source| {
            LoadError::Csv {
                path: path.to_owned(),
                source,
            }
        })?;
        tracing::info!(
            path = %path.display(),
            rows = bestiary.rows_read,
            monsters = bestiary.monsters.len(),
            dropped = bestiary.dropped(),
            "loaded monster file"
        );
        Ok(bestiary)
    }

    /// Reads CSV with a header row from any reader.
    ///
    /// Fields that are not valid UTF-8 are decoded lossily.
    pub fn from_reader<R>(reader: R) -> Result<Self, csv::Error>
    where
        R: io::Read,
    {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = decode_lossy(rdr.byte_headers()?);
        let mut rows = Vec::new();
        for record in rdr.byte_records() {
            let record = decode_lossy(&record?);
            rows.push(record.deserialize::<MonsterRow>(Some(&headers))?);
        }
        Ok(Self::from_rows(rows))
    }

    /// Normalizes rows, dropping those without a parseable challenge rating.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = MonsterRow>,
    {
        let mut rows_read = 0;
        let monsters = rows
            .into_iter()
            .filter_map(|row| {
                rows_read += 1;
                let monster = normalize(&row);
                if monster.is_none() {
                    tracing::debug!(
                        name = row.name.as_deref().unwrap_or_default(),
                        cr = row.cr.as_deref().unwrap_or_default(),
                        "dropping row with unparseable challenge rating"
                    );
                }
                monster
            })
            .collect();
        Self {
            monsters,
            rows_read,
        }
    }

    #[must_use]
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    #[must_use]
    pub fn into_monsters(self) -> Vec<Monster> {
        self.monsters
    }

    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Rows rejected for an unparseable challenge rating.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.rows_read - self.monsters.len()
    }
}

fn decode_lossy(record: &csv::ByteRecord) -> csv::StringRecord {
    record.iter().map(String::from_utf8_lossy).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageType;

    const SAMPLE: &str = "\
name,type,size,environment,cr,hp,ac,speed_fly,damage_resistances,extra_column
Goblin,humanoid,Small,\"forest, grassland\",1/4,7,15,,,x
Young Dragon,DRAGON,Large,Mountain,10,178,18,80,fire,x
Mystery,,,,,,,,,x
Ogre,giant,Large,hill,2,59,11,0,,x
";

    #[test]
    fn test_reads_rows_and_drops_unparseable_cr() {
        let bestiary = Bestiary::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(bestiary.rows_read(), 4);
        assert_eq!(bestiary.monsters().len(), 3);
        assert_eq!(bestiary.dropped(), 1);
        assert!(
            bestiary
                .monsters()
                .iter()
                .all(|m| m.challenge_rating.is_finite())
        );
    }

    #[test]
    fn test_normalizes_fields() {
        let bestiary = Bestiary::from_reader(SAMPLE.as_bytes()).unwrap();
        let goblin = &bestiary.monsters()[0];
        assert_eq!(goblin.name, "Goblin");
        assert_eq!(goblin.challenge_rating, 0.25);
        assert_eq!(goblin.environment_group.as_deref(), Some("Forest"));
        assert_eq!(goblin.type_group, "Humanoid");
        assert!(!goblin.can_fly);

        let dragon = &bestiary.monsters()[1];
        assert_eq!(dragon.type_group, "Dragon");
        assert!(dragon.can_fly);
        assert_eq!(dragon.resistant_to.len(), 1);
    }

    #[test]
    fn test_missing_columns_are_tolerated() {
        let csv = "name,cr\nRat,0\n";
        let bestiary = Bestiary::from_reader(csv.as_bytes()).unwrap();
        let rat = &bestiary.monsters()[0];
        assert_eq!(rat.challenge_rating, 0.0);
        assert_eq!(rat.hit_points, None);
        assert_eq!(rat.environment_group, None);
    }

    #[test]
    fn test_invalid_utf8_field_is_decoded_lossily() {
        let csv = b"name,cr,damage_resistances\nWolf,1,cold\nImp,1,fire \xff\n";
        let bestiary = Bestiary::from_reader(&csv[..]).unwrap();
        assert_eq!(bestiary.monsters().len(), 2);
        let imp = &bestiary.monsters()[1];
        assert_eq!(imp.name, "Imp");
        assert!(imp.resistant_to.contains(DamageType::Fire));
    }

    #[test]
    fn test_ragged_file_is_a_load_error() {
        let csv = "name,cr\nRat,0,extra\n";
        assert!(Bestiary::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = Bestiary::from_path("/nonexistent/monsters.csv").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/monsters.csv"));
    }
}
