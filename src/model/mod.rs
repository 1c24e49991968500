// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Domain models for the administrative collections.
//!
//! One record struct per collection the console manages, plus the closed
//! vocabularies (roles, statuses, tiers) they use. Records are plain data;
//! queries and persistence live in the `source` module.

/// Generates a copyable enum with `as_str`/`parse` over fixed lowercase
/// tokens, the storage and command-line form of each vocabulary.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(crate) enum $name {
            $($variant,)+
        }

        impl $name {
            pub(crate) fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)+
                }
            }

            pub(crate) fn parse(value: &str) -> Option<Self> {
                match value {
                    $($token => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

str_enum!(Role {
    Admin => "admin",
    Setter => "setter",
    Contestant => "contestant",
});

str_enum!(Difficulty {
    Easy => "easy",
    Medium => "medium",
    Hard => "hard",
});

str_enum!(ContestStatus {
    Scheduled => "scheduled",
    Running => "running",
    Finished => "finished",
});

str_enum!(PurchaseStatus {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
});

str_enum!(Provider {
    Stripe => "stripe",
    Paypal => "paypal",
    Promo => "promo",
});

str_enum!(ItemKind {
    Icon => "icon",
    Theme => "theme",
    Booster => "booster",
});

str_enum!(Tier {
    Bronze => "bronze",
    Silver => "silver",
    Gold => "gold",
});

str_enum!(Audience {
    All => "all",
    Contestants => "contestants",
    Setters => "setters",
});

str_enum!(NoticeStatus {
    Queued => "queued",
    Sent => "sent",
});

/// The administrative collections the console can display. Doubles as the
/// main-view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityKind {
    Users,
    Problems,
    Contests,
    Purchases,
    StoreItems,
    Badges,
    Notices,
}

impl EntityKind {
    pub(crate) const ALL: [Self; 7] = [
        Self::Users,
        Self::Problems,
        Self::Contests,
        Self::Purchases,
        Self::StoreItems,
        Self::Badges,
        Self::Notices,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::Problems => "Problems",
            Self::Contests => "Contests",
            Self::Purchases => "Purchases",
            Self::StoreItems => "Store",
            Self::Badges => "Badges",
            Self::Notices => "Notices",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct UserAccount {
    pub(crate) id: i64,
    pub(crate) handle: String,
    pub(crate) display_name: String,
    pub(crate) email: String,
    pub(crate) role: Role,
    pub(crate) rating: i64,
    pub(crate) coins: i64,
    pub(crate) banned: bool,
    pub(crate) created_at: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct Problem {
    pub(crate) id: i64,
    pub(crate) code: String,
    pub(crate) title: String,
    pub(crate) difficulty: Difficulty,
    pub(crate) points: i64,
    pub(crate) author: String,
    pub(crate) visible: bool,
    pub(crate) submissions: i64,
    pub(crate) solved: i64,
    pub(crate) created_at: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct Contest {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) status: ContestStatus,
    pub(crate) starts_at: i64,
    pub(crate) duration_minutes: i64,
    pub(crate) participants: i64,
    pub(crate) created_at: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct CoinPurchase {
    pub(crate) id: i64,
    pub(crate) user_handle: String,
    pub(crate) coins: i64,
    pub(crate) amount_cents: i64,
    pub(crate) provider: Provider,
    pub(crate) status: PurchaseStatus,
    pub(crate) reference: String,
    pub(crate) created_at: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct StoreItem {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) kind: ItemKind,
    pub(crate) price_coins: i64,
    /// `None` means unlimited stock.
    pub(crate) stock: Option<i64>,
    pub(crate) active: bool,
    pub(crate) created_at: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct Badge {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) tier: Tier,
    pub(crate) awarded: i64,
    pub(crate) created_at: i64,
}

/// A push-notification dispatch record.
#[derive(Debug, Clone)]
pub(crate) struct Notice {
    pub(crate) id: i64,
    pub(crate) audience: Audience,
    pub(crate) message: String,
    pub(crate) status: NoticeStatus,
    pub(crate) created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_enum_round_trips() {
        assert_eq!(Role::parse("setter"), Some(Role::Setter));
        assert_eq!(Role::Setter.as_str(), "setter");
        assert_eq!(Role::parse("SETTER"), None);

        assert_eq!(PurchaseStatus::parse("pending"), Some(PurchaseStatus::Pending));
        assert_eq!(Audience::parse("everyone"), None);
        assert_eq!(NoticeStatus::Sent.as_str(), "sent");
    }
}
