//! In-memory implementation of every store trait.
//!
//! All tables live behind one `RwLock`, so each trait method is a single
//! critical section. That makes the conditional status update a true
//! compare-and-set without further coordination.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use skillswap_core::error::AppError;
use skillswap_core::result::AppResult;
use skillswap_core::types::{SwapRequestId, UserId};
use skillswap_entity::profile::{Profile, ProfileListing, UpsertProfile};
use skillswap_entity::swap::{CreateSwapRequest, SwapRequest, SwapStatus};
use skillswap_entity::user::{CreateUser, User};

use crate::store::{ProfileStore, SwapRequestStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    swaps: BTreeMap<SwapRequestId, SwapRequest>,
    profiles: BTreeMap<UserId, Profile>,
    next_user_id: i64,
    next_swap_id: i64,
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut rows: Vec<SwapRequest>) -> Vec<SwapRequest> {
    rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Err(AppError::conflict("Email already in use"));
        }

        tables.next_user_id += 1;
        let user = User {
            id: UserId(tables.next_user_id),
            name: data.name.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            is_admin: data.is_admin,
            is_active: true,
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(users)
    }

    async fn set_active(&self, id: UserId, active: bool) -> AppResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            user.is_active = active;
            user.clone()
        }))
    }
}

#[async_trait]
impl SwapRequestStore for MemoryStore {
    async fn create(&self, data: &CreateSwapRequest) -> AppResult<SwapRequest> {
        if data.from_user_id == data.to_user_id {
            return Err(AppError::validation("Cannot send a swap request to yourself"));
        }

        let mut tables = self.tables.write().await;
        tables.next_swap_id += 1;
        let now = Utc::now();
        let request = SwapRequest {
            id: SwapRequestId(tables.next_swap_id),
            from_user_id: data.from_user_id,
            to_user_id: data.to_user_id,
            skill_needed: data.skill_needed.clone(),
            skill_offered: data.skill_offered.clone(),
            schedule: data.schedule.clone(),
            message: data.message.clone(),
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        tables.swaps.insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_by_id(&self, id: SwapRequestId) -> AppResult<Option<SwapRequest>> {
        Ok(self.tables.read().await.swaps.get(&id).cloned())
    }

    async fn update_status_if_pending(
        &self,
        id: SwapRequestId,
        status: SwapStatus,
    ) -> AppResult<Option<SwapRequest>> {
        let mut tables = self.tables.write().await;
        let Some(request) = tables.swaps.get_mut(&id) else {
            return Ok(None);
        };
        if !request.status.is_pending() {
            return Ok(None);
        }
        request.status = status;
        request.updated_at = Utc::now();
        Ok(Some(request.clone()))
    }

    async fn list_sent(&self, user_id: UserId) -> AppResult<Vec<SwapRequest>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .swaps
                .values()
                .filter(|r| r.from_user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_received(&self, user_id: UserId) -> AppResult<Vec<SwapRequest>> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables
                .swaps
                .values()
                .filter(|r| r.to_user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> AppResult<Vec<SwapRequest>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.swaps.values().cloned().collect()))
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn upsert(&self, data: &UpsertProfile) -> AppResult<Profile> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&data.user_id) {
            return Err(AppError::not_found(format!("User {} not found", data.user_id)));
        }
        let profile = Profile {
            user_id: data.user_id,
            location: data.location.clone(),
            skills_offered: data.skills_offered.clone(),
            skills_wanted: data.skills_wanted.clone(),
            availability: data.availability,
            is_public: data.is_public,
            updated_at: Utc::now(),
        };
        tables.profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&user_id).cloned())
    }

    async fn list_public(&self) -> AppResult<Vec<ProfileListing>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<(&Profile, &User)> = tables
            .profiles
            .values()
            .filter(|p| p.is_public)
            .filter_map(|p| tables.users.get(&p.user_id).map(|u| (p, u)))
            .filter(|(_, u)| u.is_active)
            .collect();
        rows.sort_by(|(a, _), (b, _)| (b.updated_at, b.user_id).cmp(&(a.updated_at, a.user_id)));

        Ok(rows
            .into_iter()
            .map(|(p, u)| ProfileListing {
                user_id: p.user_id,
                name: u.name.clone(),
                location: p.location.clone(),
                skills_offered: p.skills_offered.clone(),
                skills_wanted: p.skills_wanted.clone(),
                availability: p.availability,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use skillswap_core::error::ErrorKind;
    use skillswap_entity::profile::Availability;

    use super::*;

    async fn user(store: &MemoryStore, email: &str) -> User {
        UserStore::create(
            store,
            &CreateUser {
                name: email.split('@').next().unwrap_or_default().to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                is_admin: false,
            },
        )
        .await
        .unwrap()
    }

    fn swap(from: UserId, to: UserId, needed: &str) -> CreateSwapRequest {
        CreateSwapRequest {
            from_user_id: from,
            to_user_id: to,
            skill_needed: needed.to_string(),
            skill_offered: "Spanish".to_string(),
            schedule: None,
            message: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_regardless_of_case() {
        let store = MemoryStore::new();
        user(&store, "ana@example.com").await;

        let err = UserStore::create(
            &store,
            &CreateUser {
                name: "Ana again".into(),
                email: "ANA@example.com".into(),
                password_hash: "x".into(),
                is_admin: false,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn lists_are_newest_first() {
        let store = MemoryStore::new();
        let a = user(&store, "a@example.com").await;
        let b = user(&store, "b@example.com").await;

        let first = SwapRequestStore::create(&store, &swap(a.id, b.id, "Guitar")).await.unwrap();
        let second = SwapRequestStore::create(&store, &swap(a.id, b.id, "Piano")).await.unwrap();

        let ids = |rows: Vec<SwapRequest>| rows.iter().map(|r| r.id).collect::<Vec<_>>();
        let sent = ids(store.list_sent(a.id).await.unwrap());
        assert_eq!(sent, vec![second.id, first.id]);
        let received = ids(store.list_received(b.id).await.unwrap());
        assert_eq!(received, vec![second.id, first.id]);
        assert!(store.list_sent(b.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn conditional_update_applies_once() {
        let store = MemoryStore::new();
        let a = user(&store, "a@example.com").await;
        let b = user(&store, "b@example.com").await;
        let req = SwapRequestStore::create(&store, &swap(a.id, b.id, "Guitar")).await.unwrap();

        let updated = store
            .update_status_if_pending(req.id, SwapStatus::Accepted)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, SwapStatus::Accepted);

        let again = store
            .update_status_if_pending(req.id, SwapStatus::Declined)
            .await
            .unwrap();
        assert!(again.is_none());
        let stored = SwapRequestStore::find_by_id(&store, req.id).await.unwrap().unwrap();
        assert_eq!(stored.status, SwapStatus::Accepted);

        let missing = store
            .update_status_if_pending(SwapRequestId(999), SwapStatus::Accepted)
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_have_exactly_one_winner() {
        let store = Arc::new(MemoryStore::new());
        let a = user(&store, "a@example.com").await;
        let b = user(&store, "b@example.com").await;
        let req = SwapRequestStore::create(store.as_ref(), &swap(a.id, b.id, "Guitar"))
            .await
            .unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                let status = if i % 2 == 0 { SwapStatus::Accepted } else { SwapStatus::Declined };
                tokio::spawn(async move { store.update_status_if_pending(req.id, status).await })
            })
            .collect();

        let winners: Vec<SwapRequest> = futures::future::join_all(handles)
            .await
            .into_iter()
            .filter_map(|r| r.unwrap().unwrap())
            .collect();
        assert_eq!(winners.len(), 1);

        let stored = SwapRequestStore::find_by_id(store.as_ref(), req.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, winners[0].status);
    }

    #[tokio::test]
    async fn public_listing_hides_private_and_inactive() {
        let store = MemoryStore::new();
        let visible = user(&store, "visible@example.com").await;
        let private = user(&store, "private@example.com").await;
        let banned = user(&store, "banned@example.com").await;

        for (u, public) in [(&visible, true), (&private, false), (&banned, true)] {
            store
                .upsert(&UpsertProfile {
                    user_id: u.id,
                    location: None,
                    skills_offered: vec!["Cooking".into()],
                    skills_wanted: vec![],
                    availability: Availability::Available,
                    is_public: public,
                })
                .await
                .unwrap();
        }
        store.set_active(banned.id, false).await.unwrap();

        let listed = store.list_public().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, visible.id);
        assert_eq!(listed[0].name, "visible");
    }
}
