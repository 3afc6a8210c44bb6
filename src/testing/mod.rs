//! In-memory storage for unit and router tests.
//!
//! `MemoryStore` implements every repository trait against plain maps guarded
//! by one mutex. It mirrors the PostgreSQL schema's rules that tests rely on:
//! foreign keys, idempotent junction rows, cascading deletes and
//! all-or-nothing child writes. Every mutating call is counted, and
//! `fail_writes` makes them fail the way a dropped connection would.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{
    Allergy, AssociationSync, Caretaker, Child, Group, Need, Volunteer,
};
use crate::database::repository::{
    AllergyRepository, CaretakerRepository, ChildRepository, GroupRepository, HealthCheck,
    NeedRepository, Repositories, VolunteerRepository,
};
use crate::filter::ChildFilter;

type Links = BTreeSet<(String, String)>;

#[derive(Default)]
struct State {
    children: BTreeMap<String, Child>,
    needs: BTreeMap<String, Need>,
    allergies: BTreeMap<String, Allergy>,
    groups: BTreeMap<String, Group>,
    caretakers: BTreeMap<String, Caretaker>,
    volunteers: BTreeMap<String, Volunteer>,
    child_needs: Links,
    child_allergies: Links,
}

impl State {
    fn check_references(&self, child: &Child, sync: AssociationSync) -> Result<(), String> {
        if let Some(group_id) = &child.group_id {
            if !self.groups.contains_key(group_id) {
                return Err(format!("group {} does not exist", group_id));
            }
        }
        if sync.needs {
            for need in child.needs.iter().filter(|n| n.is_identified()) {
                if !self.needs.contains_key(&need.id) {
                    return Err(format!("need {} does not exist", need.id));
                }
            }
        }
        if sync.allergies {
            for allergy in child.allergies.iter().filter(|a| a.is_identified()) {
                if !self.allergies.contains_key(&allergy.id) {
                    return Err(format!("allergy {} does not exist", allergy.id));
                }
            }
        }
        Ok(())
    }

    fn store_new_associations(&mut self, child: &mut Child, sync: AssociationSync) {
        let now = Utc::now();
        if sync.needs {
            for need in child.needs.iter_mut().filter(|n| !n.is_identified()) {
                need.id = Uuid::new_v4().to_string();
                need.created_at = Some(now);
                need.updated_at = Some(now);
                self.needs.insert(need.id.clone(), need.clone());
            }
        }
        if sync.allergies {
            for allergy in child.allergies.iter_mut().filter(|a| !a.is_identified()) {
                allergy.id = Uuid::new_v4().to_string();
                allergy.created_at = Some(now);
                allergy.updated_at = Some(now);
                self.allergies.insert(allergy.id.clone(), allergy.clone());
            }
        }
    }

    fn replace_links(links: &mut Links, child_id: &str, wanted: impl Iterator<Item = String>) {
        links.retain(|(c, _)| c != child_id);
        links.extend(wanted.map(|id| (child_id.to_string(), id)));
    }

    fn hydrate(&self, mut child: Child) -> Child {
        child.needs = self
            .child_needs
            .iter()
            .filter(|(c, _)| *c == child.id)
            .filter_map(|(_, n)| self.needs.get(n).cloned())
            .collect();
        child.allergies = self
            .child_allergies
            .iter()
            .filter(|(c, _)| *c == child.id)
            .filter_map(|(_, a)| self.allergies.get(a).cloned())
            .collect();
        child
    }
}

pub struct MemoryStore {
    state: Mutex<State>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
    healthy: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State::default()),
            writes: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
            healthy: AtomicBool::new(true),
        })
    }

    /// Every repository backed by this one store
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            children: self.clone(),
            needs: self.clone(),
            allergies: self.clone(),
            groups: self.clone(),
            caretakers: self.clone(),
            volunteers: self.clone(),
        }
    }

    /// Number of mutating repository calls so far, failed ones included
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn child_count(&self) -> usize {
        self.lock().children.len()
    }

    pub fn need_count(&self) -> usize {
        self.lock().needs.len()
    }

    pub fn allergy_count(&self) -> usize {
        self.lock().allergies.len()
    }

    /// Junction rows in `child_needs` for one child
    pub fn need_links(&self, child_id: &str) -> usize {
        self.lock().child_needs.iter().filter(|(c, _)| c == child_id).count()
    }

    /// Junction rows in `child_allergies` for one child
    pub fn allergy_links(&self, child_id: &str) -> usize {
        self.lock().child_allergies.iter().filter(|(c, _)| c == child_id).count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Count a write and fail it when asked to
    fn begin_write(&self, operation: &'static str) -> Result<MutexGuard<'_, State>, DatabaseError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::query(operation, sqlx::Error::PoolTimedOut));
        }
        Ok(self.lock())
    }
}

fn foreign_key(operation: &'static str, detail: String) -> DatabaseError {
    DatabaseError::query(
        operation,
        sqlx::Error::Protocol(format!("foreign key violation: {}", detail)),
    )
}

#[async_trait]
impl ChildRepository for MemoryStore {
    async fn create(&self, child: &mut Child) -> Result<(), DatabaseError> {
        const OP: &str = "child_repository.create";
        let mut state = self.begin_write(OP)?;
        let all = AssociationSync { needs: true, allergies: true };
        state.check_references(child, all).map_err(|d| foreign_key(OP, d))?;

        state.store_new_associations(child, all);
        let now = Utc::now();
        child.id = Uuid::new_v4().to_string();
        child.created_at = Some(now);
        child.updated_at = Some(now);

        let row = Child {
            needs: Vec::new(),
            allergies: Vec::new(),
            ..child.clone()
        };
        state.children.insert(child.id.clone(), row);
        for need in &child.needs {
            state.child_needs.insert((child.id.clone(), need.id.clone()));
        }
        for allergy in &child.allergies {
            state.child_allergies.insert((child.id.clone(), allergy.id.clone()));
        }
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Child, DatabaseError> {
        let state = self.lock();
        let child = state
            .children
            .get(id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("child {}", id)))?;
        Ok(state.hydrate(child))
    }

    async fn update(&self, child: &mut Child, sync: AssociationSync) -> Result<(), DatabaseError> {
        const OP: &str = "child_repository.update";
        let mut state = self.begin_write(OP)?;
        let created_at = match state.children.get(&child.id) {
            Some(existing) => existing.created_at,
            None => return Err(DatabaseError::NotFound(format!("child {}", child.id))),
        };
        state.check_references(child, sync).map_err(|d| foreign_key(OP, d))?;

        state.store_new_associations(child, sync);
        child.created_at = created_at;
        child.updated_at = Some(Utc::now());
        let row = Child {
            needs: Vec::new(),
            allergies: Vec::new(),
            ..child.clone()
        };
        state.children.insert(child.id.clone(), row);

        if sync.needs {
            let wanted = child.needs.iter().map(|n| n.id.clone());
            State::replace_links(&mut state.child_needs, &child.id, wanted);
        }
        if sync.allergies {
            let wanted = child.allergies.iter().map(|a| a.id.clone());
            State::replace_links(&mut state.child_allergies, &child.id, wanted);
        }

        let fresh = state.hydrate(child.clone());
        child.needs = fresh.needs;
        child.allergies = fresh.allergies;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
        let mut state = self.begin_write("child_repository.delete")?;
        if state.children.remove(id).is_none() {
            return Err(DatabaseError::NotFound(format!("child {}", id)));
        }
        state.child_needs.retain(|(c, _)| c != id);
        state.child_allergies.retain(|(c, _)| c != id);
        Ok(())
    }

    async fn list(&self, _filter: &ChildFilter, limit: i64) -> Result<Vec<Child>, DatabaseError> {
        let state = self.lock();
        let mut rows: Vec<Child> = state.children.values().cloned().collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        Ok(rows
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|c| state.hydrate(c))
            .collect())
    }

    async fn associate_need(&self, child_id: &str, need_id: &str) -> Result<(), DatabaseError> {
        const OP: &str = "child_repository.associate_need";
        if child_id.is_empty() {
            return Err(DatabaseError::MissingIdentifier("child_id"));
        }
        if need_id.is_empty() {
            return Err(DatabaseError::MissingIdentifier("need_id"));
        }
        let mut state = self.begin_write(OP)?;
        if !state.children.contains_key(child_id) {
            return Err(foreign_key(OP, format!("child {} does not exist", child_id)));
        }
        if !state.needs.contains_key(need_id) {
            return Err(foreign_key(OP, format!("need {} does not exist", need_id)));
        }
        state.child_needs.insert((child_id.to_string(), need_id.to_string()));
        Ok(())
    }

    async fn associate_allergy(&self, child_id: &str, allergy_id: &str) -> Result<(), DatabaseError> {
        const OP: &str = "child_repository.associate_allergy";
        if child_id.is_empty() {
            return Err(DatabaseError::MissingIdentifier("child_id"));
        }
        if allergy_id.is_empty() {
            return Err(DatabaseError::MissingIdentifier("allergy_id"));
        }
        let mut state = self.begin_write(OP)?;
        if !state.children.contains_key(child_id) {
            return Err(foreign_key(OP, format!("child {} does not exist", child_id)));
        }
        if !state.allergies.contains_key(allergy_id) {
            return Err(foreign_key(OP, format!("allergy {} does not exist", allergy_id)));
        }
        state.child_allergies.insert((child_id.to_string(), allergy_id.to_string()));
        Ok(())
    }
}

#[async_trait]
impl NeedRepository for MemoryStore {
    async fn create(&self, need: &mut Need) -> Result<(), DatabaseError> {
        let mut state = self.begin_write("need_repository.create")?;
        let now = Utc::now();
        need.id = Uuid::new_v4().to_string();
        need.created_at = Some(now);
        need.updated_at = Some(now);
        state.needs.insert(need.id.clone(), need.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Need, DatabaseError> {
        self.lock()
            .needs
            .get(id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("need {}", id)))
    }

    async fn list(&self, limit: i64) -> Result<Vec<Need>, DatabaseError> {
        let mut rows: Vec<Need> = self.lock().needs.values().cloned().collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}

#[async_trait]
impl AllergyRepository for MemoryStore {
    async fn create(&self, allergy: &mut Allergy) -> Result<(), DatabaseError> {
        let mut state = self.begin_write("allergy_repository.create")?;
        let now = Utc::now();
        allergy.id = Uuid::new_v4().to_string();
        allergy.created_at = Some(now);
        allergy.updated_at = Some(now);
        state.allergies.insert(allergy.id.clone(), allergy.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> Result<Allergy, DatabaseError> {
        self.lock()
            .allergies
            .get(id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("allergy {}", id)))
    }

    async fn list(&self, limit: i64) -> Result<Vec<Allergy>, DatabaseError> {
        let mut rows: Vec<Allergy> = self.lock().allergies.values().cloned().collect();
        rows.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}

/// CRUD over one of the plain directory maps
macro_rules! directory_repository {
    ($trait:ident, $model:ident, $field:ident, $label:literal) => {
        #[async_trait]
        impl $trait for MemoryStore {
            async fn create(&self, record: &mut $model) -> Result<(), DatabaseError> {
                let mut state = self.begin_write(concat!($label, "_repository.create"))?;
                let now = Utc::now();
                record.id = Uuid::new_v4().to_string();
                record.created_at = Some(now);
                record.updated_at = Some(now);
                state.$field.insert(record.id.clone(), record.clone());
                Ok(())
            }

            async fn get_by_id(&self, id: &str) -> Result<$model, DatabaseError> {
                self.lock()
                    .$field
                    .get(id)
                    .cloned()
                    .ok_or_else(|| DatabaseError::NotFound(format!(concat!($label, " {}"), id)))
            }

            async fn update(&self, record: &mut $model) -> Result<(), DatabaseError> {
                let mut state = self.begin_write(concat!($label, "_repository.update"))?;
                let created_at = match state.$field.get(&record.id) {
                    Some(existing) => existing.created_at,
                    None => {
                        return Err(DatabaseError::NotFound(format!(
                            concat!($label, " {}"),
                            record.id
                        )))
                    }
                };
                record.created_at = created_at;
                record.updated_at = Some(Utc::now());
                state.$field.insert(record.id.clone(), record.clone());
                Ok(())
            }

            async fn delete(&self, id: &str) -> Result<(), DatabaseError> {
                let mut state = self.begin_write(concat!($label, "_repository.delete"))?;
                state
                    .$field
                    .remove(id)
                    .map(|_| ())
                    .ok_or_else(|| DatabaseError::NotFound(format!(concat!($label, " {}"), id)))
            }

            async fn list(&self, limit: i64) -> Result<Vec<$model>, DatabaseError> {
                let mut rows: Vec<$model> = self.lock().$field.values().cloned().collect();
                rows.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
                rows.truncate(limit.max(0) as usize);
                Ok(rows)
            }
        }
    };
}

directory_repository!(GroupRepository, Group, groups, "group");
directory_repository!(CaretakerRepository, Caretaker, caretakers, "caretaker");
directory_repository!(VolunteerRepository, Volunteer, volunteers, "volunteer");

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.healthy.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DatabaseError::query("database.health_check", sqlx::Error::PoolTimedOut))
        }
    }
}
