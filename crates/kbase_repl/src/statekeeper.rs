use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use kbase::{kb::Snapshot, KbErr, KnowledgeBase, SearchLimits};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum PersistErr {
    Io(io::Error),
    Json(serde_json::Error),
    Kb(KbErr),
}

impl fmt::Display for PersistErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistErr::Io(e) => write!(f, "Could not access the state file: {e}"),
            PersistErr::Json(e) => write!(f, "Malformed state file: {e}"),
            PersistErr::Kb(e) => write!(f, "Could not restore the knowledge base: {e}"),
        }
    }
}

impl From<io::Error> for PersistErr {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistErr {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<KbErr> for PersistErr {
    fn from(e: KbErr) -> Self {
        Self::Kb(e)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    saved_at: DateTime<Utc>,
    snapshot: Snapshot,
}

/// Keeps the knowledge base in a JSON file between runs.
pub struct StateKeeper {
    path: PathBuf,
}

impl StateKeeper {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restores the saved base. A missing file is not an error.
    pub fn load(&self, limits: SearchLimits) -> Result<Option<KnowledgeBase>, PersistErr> {
        let s = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let state: StateFile = serde_json::from_str(&s)?;
        let kb = KnowledgeBase::restore(state.snapshot, limits)?;
        info!(
            "restored {} formulas saved at {} from {}",
            kb.len(),
            state.saved_at,
            self.path.display()
        );
        Ok(Some(kb))
    }

    pub fn save(&self, kb: &KnowledgeBase) -> Result<(), PersistErr> {
        let state = StateFile {
            saved_at: Utc::now(),
            snapshot: kb.snapshot(),
        };
        let s = serde_json::to_string_pretty(&state)?;
        fs::write(&self.path, s)?;
        info!("saved {} formulas to {}", kb.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbase::{parse::parse_fo_formula, session, ProofOutcome};

    #[test]
    fn missing_file() {
        session(|| {
            let dir = tempfile::tempdir().unwrap();
            let keeper = StateKeeper::new(dir.path().join("kb.json"));
            assert!(keeper.load(SearchLimits::default()).unwrap().is_none());
        })
    }

    #[test]
    fn save_and_load() {
        session(|| {
            let dir = tempfile::tempdir().unwrap();
            let keeper = StateKeeper::new(dir.path().join("kb.json"));

            let mut kb = KnowledgeBase::new();
            kb.add_axiom(parse_fo_formula("man(Marcus)").unwrap()).unwrap();
            kb.add_axiom(parse_fo_formula("\\all x: (man(x) -> person(x))").unwrap())
                .unwrap();
            keeper.save(&kb).unwrap();

            let mut loaded = keeper.load(SearchLimits::default()).unwrap().unwrap();
            assert_eq!(2, loaded.len());
            let goal = parse_fo_formula("person(Marcus)").unwrap();
            assert_eq!(ProofOutcome::Entailed, loaded.prove(&goal).unwrap());
        })
    }

    #[test]
    fn rejects_tampering() {
        session(|| {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("kb.json");
            let keeper = StateKeeper::new(&path);

            let mut kb = KnowledgeBase::new();
            kb.add_axiom(parse_fo_formula("man(Marcus)").unwrap()).unwrap();
            keeper.save(&kb).unwrap();

            let s = fs::read_to_string(&path).unwrap().replace("Marcus", "Caesar");
            fs::write(&path, s).unwrap();
            assert!(matches!(
                keeper.load(SearchLimits::default()),
                Err(PersistErr::Kb(KbErr::Snapshot(_)))
            ));
        })
    }

    #[test]
    fn garbage() {
        session(|| {
            let file = tempfile::NamedTempFile::new().unwrap();
            fs::write(file.path(), "not json").unwrap();
            let keeper = StateKeeper::new(file.path());
            assert!(matches!(
                keeper.load(SearchLimits::default()),
                Err(PersistErr::Json(_))
            ));
        })
    }
}
