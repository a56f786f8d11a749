/**
 * Member Store
 *
 * This module owns the persisted member file: a JSON object mapping a
 * synthetic key (`member1`, `member2`, ...) to a member record.
 *
 * ```json
 * {
 *     "member1": {
 *         "username": "alice",
 *         "password": "secret123",
 *         "id": "M0001"
 *     }
 * }
 * ```
 *
 * # Consistency
 *
 * - Usernames are unique; registering an existing name is rejected
 * - Member IDs increase with every registration (highest existing + 1)
 * - Every mutation rewrites the whole document, pretty-printed, through a
 *   temporary file that is renamed over the original
 * - Read, compute and write happen under one mutex, so concurrent
 *   registrations in this process cannot lose updates
 *
 * Nothing guards against a second process writing the same file.
 */

use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tokio::sync::Mutex;

use crate::backend::error::{AuthError, AuthResult};
use crate::shared::{MemberId, MemberRecord, PasswordScheme};

/// In-memory form of the member file, in key order
#[derive(Debug, Clone, Default, PartialEq)]
struct MemberDocument {
    entries: Vec<(String, MemberRecord)>,
}

impl MemberDocument {
    fn parse(bytes: &[u8]) -> AuthResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| AuthError::store_corrupt(format!("not valid JSON: {}", e)))?;

        let serde_json::Value::Object(map) = value else {
            return Err(AuthError::store_corrupt("top level is not a JSON object"));
        };

        let mut entries = Vec::with_capacity(map.len());
        for (key, raw) in map {
            let record: MemberRecord = serde_json::from_value(raw)
                .map_err(|e| AuthError::store_corrupt(format!("record '{}': {}", key, e)))?;
            entries.push((key, record));
        }

        Ok(Self { entries })
    }

    fn render(&self) -> AuthResult<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| AuthError::store_corrupt(format!("failed to serialize: {}", e)))?;
        out.push(b'\n');
        Ok(out)
    }

    fn records(&self) -> impl Iterator<Item = &MemberRecord> {
        self.entries.iter().map(|(_, record)| record)
    }

    fn contains_username(&self, username: &str) -> bool {
        self.records().any(|r| r.username == username)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    fn next_member_id(&self) -> AuthResult<MemberId> {
        match self.records().map(|r| r.id).max() {
            None => Ok(MemberId::FIRST),
            Some(highest) => highest.next().ok_or_else(|| {
                AuthError::store_corrupt(format!("no member id follows {}", highest))
            }),
        }
    }

    /// `member<N+1>` for N records, skipping keys already in use
    fn next_key(&self) -> String {
        let mut n = self.entries.len() + 1;
        loop {
            let key = format!("member{}", n);
            if !self.contains_key(&key) {
                return key;
            }
            n += 1;
        }
    }
}

impl Serialize for MemberDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, record) in &self.entries {
            map.serialize_entry(key, record)?;
        }
        map.end()
    }
}

/// File-backed member registry
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    scheme: PasswordScheme,
    bcrypt_cost: u32,
    lock: Mutex<()>,
}

impl CredentialStore {
    /// Store over an existing member file
    pub fn new(path: impl Into<PathBuf>, scheme: PasswordScheme, bcrypt_cost: u32) -> Self {
        Self {
            path: path.into(),
            scheme,
            bcrypt_cost,
            lock: Mutex::new(()),
        }
    }

    /// Store over `path`, creating an empty member file if none exists
    pub async fn open(
        path: impl Into<PathBuf>,
        scheme: PasswordScheme,
        bcrypt_cost: u32,
    ) -> AuthResult<Self> {
        let store = Self::new(path, scheme, bcrypt_cost);

        if !tokio::fs::try_exists(&store.path).await? {
            tracing::info!("Creating empty member file at {}", store.path.display());
            if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            store.persist(&MemberDocument::default()).await?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scheme(&self) -> PasswordScheme {
        self.scheme
    }

    /// Find the member whose username and password both match
    ///
    /// Returns the first match in file order, or `None`.
    pub async fn verify(&self, username: &str, password: &str) -> AuthResult<Option<MemberRecord>> {
        let document = {
            let _guard = self.lock.lock().await;
            self.load().await?
        };

        for record in document.records().filter(|r| r.username == username) {
            if self.secret_matches(password, &record.password)? {
                return Ok(Some(record.clone()));
            }
        }

        Ok(None)
    }

    /// Whether any member has this username
    pub async fn exists(&self, username: &str) -> AuthResult<bool> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.contains_username(username))
    }

    /// Register a member without a role
    pub async fn register(&self, username: &str, password: &str) -> AuthResult<MemberRecord> {
        self.register_with_role(username, password, None).await
    }

    /// Register a member and persist the whole member file
    ///
    /// # Errors
    ///
    /// * `DuplicateIdentity` - the username is taken; the file is untouched
    /// * `StoreCorrupt` - the file does not parse or holds a malformed ID
    /// * `Io` - the file could not be read or replaced
    pub async fn register_with_role(
        &self,
        username: &str,
        password: &str,
        role: Option<String>,
    ) -> AuthResult<MemberRecord> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;

        if document.contains_username(username) {
            tracing::warn!("Username already registered: {}", username);
            return Err(AuthError::duplicate(username));
        }

        let record = MemberRecord {
            username: username.to_string(),
            password: self.seal_secret(password)?,
            id: document.next_member_id()?,
            role,
        };
        let key = document.next_key();
        document.entries.push((key.clone(), record.clone()));

        self.persist(&document).await?;

        tracing::info!("Registered member {} as {} ({})", record.username, record.id, key);
        Ok(record)
    }

    /// All members in file order
    pub async fn members(&self) -> AuthResult<Vec<MemberRecord>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.records().cloned().collect())
    }

    pub async fn len(&self) -> AuthResult<usize> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.entries.len())
    }

    pub async fn is_empty(&self) -> AuthResult<bool> {
        Ok(self.len().await? == 0)
    }

    async fn load(&self) -> AuthResult<MemberDocument> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            tracing::error!("Failed to read member file {}: {}", self.path.display(), e);
            AuthError::Io(e)
        })?;

        MemberDocument::parse(&bytes).inspect_err(|e| {
            tracing::error!("Member file {} rejected: {}", self.path.display(), e);
        })
    }

    async fn persist(&self, document: &MemberDocument) -> AuthResult<()> {
        let bytes = document.render()?;
        let tmp = self.temp_path();

        let written = async {
            tokio::fs::write(&tmp, &bytes).await?;
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            tracing::error!("Failed to write member file {}: {}", self.path.display(), e);
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(AuthError::Io(e));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "members.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn seal_secret(&self, password: &str) -> AuthResult<String> {
        match self.scheme {
            PasswordScheme::Plain => Ok(password.to_string()),
            PasswordScheme::Bcrypt => Ok(bcrypt::hash(password, self.bcrypt_cost)?),
        }
    }

    fn secret_matches(&self, password: &str, stored: &str) -> AuthResult<bool> {
        match self.scheme {
            PasswordScheme::Plain => Ok(password == stored),
            PasswordScheme::Bcrypt => bcrypt::verify(password, stored)
                .map_err(|e| AuthError::store_corrupt(format!("stored hash unreadable: {}", e))),
        }
    }
}
