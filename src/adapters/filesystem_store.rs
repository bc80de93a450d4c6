//! JSON-file pathway store.
//!
//! Layout under the data directory:
//!
//! ```text
//! ids.json                  last assigned pathway/module ids
//! pathways/<id>.json        one document per pathway, modules and videos inline
//! awards/<learner>.json     grants held by a learner
//! questions/<module>.json   questions asked about a module
//! ```
//!
//! Every mutation takes a `<name>.lock` file next to the document it touches,
//! re-reads the document under the lock and replaces it via rename.

use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::store_writes::{apply_completion, apply_content, build_pathway, newest_first};
use crate::domain::{
    AppError, Award, AwardGrant, GeneratedContent, GrantOutcome, LearnerId, ModuleId, NewPathway,
    Pathway, PathwayId, Question,
};
use crate::ports::{CompletionWrite, ContentWrite, PathwayStore};

const IDS_FILE: &str = "ids.json";
const PATHWAYS_DIR: &str = "pathways";
const AWARDS_DIR: &str = "awards";
const QUESTIONS_DIR: &str = "questions";
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);
const LOCK_POLL: Duration = Duration::from_millis(10);

#[derive(Debug, Default, Serialize, Deserialize)]
struct IdCounters {
    last_pathway_id: u64,
    last_module_id: u64,
}

#[derive(Debug, Clone)]
pub struct FilesystemPathwayStore {
    root: PathBuf,
    lock_timeout: Duration,
}

impl FilesystemPathwayStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, AppError> {
        let root = root.into();
        for dir in [PATHWAYS_DIR, AWARDS_DIR, QUESTIONS_DIR] {
            fs::create_dir_all(root.join(dir))?;
        }
        Ok(Self { root, lock_timeout: DEFAULT_LOCK_TIMEOUT })
    }

    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pathway_path(&self, id: PathwayId) -> PathBuf {
        self.root.join(PATHWAYS_DIR).join(format!("{}.json", id))
    }

    fn awards_path(&self, learner: &LearnerId) -> PathBuf {
        self.root.join(AWARDS_DIR).join(format!("{}.json", learner))
    }

    fn questions_path(&self, module: ModuleId) -> PathBuf {
        self.root.join(QUESTIONS_DIR).join(format!("{}.json", module))
    }

    fn lock(&self, document: &Path) -> Result<FileLock, AppError> {
        FileLock::acquire(document.with_extension("lock"), self.lock_timeout)
    }

    fn all_pathways(&self) -> Result<Vec<Pathway>, AppError> {
        let mut pathways = Vec::new();
        for entry in fs::read_dir(self.root.join(PATHWAYS_DIR))? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(pathway) = read_json::<Pathway>(&path)?
            {
                pathways.push(pathway);
            }
        }
        pathways.sort_by_key(|p| p.id);
        Ok(pathways)
    }

    /// Locate the pathway holding `module`, then apply `write` to it under its lock.
    fn update_pathway_of_module<T>(
        &self,
        module: ModuleId,
        write: impl FnOnce(&mut Pathway) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let id = self
            .pathway_of_module(module)?
            .map(|p| p.id)
            .ok_or(AppError::ModuleNotFound(module))?;
        let path = self.pathway_path(id);

        let _lock = self.lock(&path)?;
        let mut pathway = read_json::<Pathway>(&path)?.ok_or(AppError::ModuleNotFound(module))?;
        let outcome = write(&mut pathway)?;
        write_json(&path, &pathway)?;
        Ok(outcome)
    }
}

impl PathwayStore for FilesystemPathwayStore {
    fn create_pathway(
        &self,
        pathway: NewPathway,
        created_at: DateTime<Utc>,
    ) -> Result<Pathway, AppError> {
        let ids_path = self.root.join(IDS_FILE);
        let _lock = self.lock(&ids_path)?;
        let mut ids = read_json::<IdCounters>(&ids_path)?.unwrap_or_default();

        let id = PathwayId(ids.last_pathway_id + 1);
        let module_count = pathway.modules.len() as u64;
        let pathway = build_pathway(id, ids.last_module_id + 1, pathway, created_at);

        // Counters before the document: a failure in between leaves an id gap only.
        ids.last_pathway_id = id.0;
        ids.last_module_id += module_count;
        write_json(&ids_path, &ids)?;
        write_json(&self.pathway_path(id), &pathway)?;

        tracing::debug!(pathway = %id, modules = module_count, "pathway written");
        Ok(pathway)
    }

    fn pathway(&self, id: PathwayId) -> Result<Option<Pathway>, AppError> {
        read_json(&self.pathway_path(id))
    }

    fn pathways_for(&self, learner: &LearnerId) -> Result<Vec<Pathway>, AppError> {
        let mut owned: Vec<Pathway> =
            self.all_pathways()?.into_iter().filter(|p| p.is_owned_by(learner)).collect();
        newest_first(&mut owned, |p| p.created_at);
        Ok(owned)
    }

    fn pathway_of_module(&self, module: ModuleId) -> Result<Option<Pathway>, AppError> {
        Ok(self.all_pathways()?.into_iter().find(|p| p.contains_module(module)))
    }

    fn store_generated_content(
        &self,
        module: ModuleId,
        content: GeneratedContent,
    ) -> Result<ContentWrite, AppError> {
        self.update_pathway_of_module(module, |pathway| apply_content(pathway, module, content))
    }

    fn mark_completed(&self, module: ModuleId) -> Result<CompletionWrite, AppError> {
        self.update_pathway_of_module(module, |pathway| apply_completion(pathway, module))
    }

    fn grant_award(
        &self,
        learner: &LearnerId,
        award: &Award,
        awarded_at: DateTime<Utc>,
    ) -> Result<GrantOutcome, AppError> {
        let path = self.awards_path(learner);
        let _lock = self.lock(&path)?;
        let mut grants = read_json::<Vec<AwardGrant>>(&path)?.unwrap_or_default();

        if grants.iter().any(|g| g.award == award.title) {
            return Ok(GrantOutcome::AlreadyHeld);
        }

        let grant =
            AwardGrant { learner: learner.clone(), award: award.title.clone(), awarded_at };
        grants.push(grant.clone());
        write_json(&path, &grants)?;
        Ok(GrantOutcome::Granted { grant })
    }

    fn awards_for(&self, learner: &LearnerId) -> Result<Vec<AwardGrant>, AppError> {
        Ok(read_json(&self.awards_path(learner))?.unwrap_or_default())
    }

    fn record_question(&self, question: Question) -> Result<Question, AppError> {
        if self.pathway_of_module(question.module)?.is_none() {
            return Err(AppError::ModuleNotFound(question.module));
        }

        let path = self.questions_path(question.module);
        let _lock = self.lock(&path)?;
        let mut questions = read_json::<Vec<Question>>(&path)?.unwrap_or_default();
        questions.push(question.clone());
        write_json(&path, &questions)?;
        Ok(question)
    }

    fn questions_for(
        &self,
        module: ModuleId,
        learner: &LearnerId,
    ) -> Result<Vec<Question>, AppError> {
        let mut asked: Vec<Question> = read_json::<Vec<Question>>(&self.questions_path(module))?
            .unwrap_or_default()
            .into_iter()
            .filter(|q| &q.learner == learner)
            .collect();
        newest_first(&mut asked, |q| q.created_at);
        Ok(asked)
    }
}

/// Exclusive lock held for as long as the value lives.
#[derive(Debug)]
struct FileLock {
    path: PathBuf,
}

impl FileLock {
    fn acquire(path: PathBuf, timeout: Duration) -> Result<Self, AppError> {
        let deadline = Instant::now() + timeout;
        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path }),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    if Instant::now() >= deadline {
                        return Err(AppError::LockTimeout(path.display().to_string()));
                    }
                    thread::sleep(LOCK_POLL);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to release lock file");
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("document");
    let tmp_path = path.with_file_name(format!(".{}.tmp", file_name));
    fs::write(&tmp_path, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
