// The guild allow-list decides which Discord servers the bot is allowed to
// act in. It is built once at startup and never changes afterwards, so it can
// be shared freely between concurrently running event handlers.
//
// Like the rest of `core`, this works with plain u64 IDs and knows nothing
// about serenity types.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildAllowList {
    ids: BTreeSet<u64>,
}

impl GuildAllowList {
    /// Builds the allow-list from the comma separated `ALLOWED_GUILD_IDS`
    /// value plus the legacy single `GUILD_ID`.
    ///
    /// Entries are trimmed and deduplicated. Blank entries are skipped and
    /// anything that is not a valid snowflake is skipped with a warning.
    pub fn from_config<'a>(
        allowed_guild_ids: Option<&'a str>,
        legacy_guild_id: Option<&'a str>,
    ) -> Self {
        let mut ids = BTreeSet::new();

        let entries = allowed_guild_ids
            .into_iter()
            .flat_map(|raw| raw.split(','))
            .chain(legacy_guild_id);

        for entry in entries {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            match entry.parse::<u64>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(_) => tracing::warn!("Ignoring invalid guild ID in configuration: {:?}", entry),
            }
        }

        let list = Self { ids };
        if list.is_empty() {
            tracing::warn!(
                "No allowed guild IDs specified. The bot will not respond to any servers."
            );
        }
        list
    }

    pub fn is_allowed(&self, guild_id: u64) -> bool {
        self.ids.contains(&guild_id)
    }

    /// Like `is_allowed`, but for events that may not come from a guild at all.
    /// DMs are never allowed.
    pub fn permits(&self, guild_id: Option<u64>) -> bool {
        guild_id.is_some_and(|id| self.is_allowed(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Allowed IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<u64> for GuildAllowList {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_list_and_legacy_id() {
        let list = GuildAllowList::from_config(Some(" 1, 2,1,,x"), Some("3"));

        assert_eq!(list.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(list.is_allowed(1));
        assert!(list.is_allowed(3));
        assert!(!list.is_allowed(4));
    }

    #[test]
    fn legacy_id_already_in_list_is_not_duplicated() {
        let list = GuildAllowList::from_config(Some("10,20"), Some("20"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn legacy_id_alone_is_enough() {
        let list = GuildAllowList::from_config(None, Some(" 42 "));
        assert!(list.is_allowed(42));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn empty_configuration_allows_nothing() {
        let list = GuildAllowList::from_config(None, None);
        assert!(list.is_empty());
        assert!(!list.is_allowed(1));

        let blank = GuildAllowList::from_config(Some(" , ,"), Some(""));
        assert!(blank.is_empty());
    }

    #[test]
    fn direct_messages_are_never_permitted() {
        let list: GuildAllowList = [7].into_iter().collect();
        assert!(list.permits(Some(7)));
        assert!(!list.permits(Some(8)));
        assert!(!list.permits(None));
    }
}
