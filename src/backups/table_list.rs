use crate::readers::DataReader;
use tracing::{info, warn};

///Which tables a run exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    ///A fixed list supplied by the caller; discovery is skipped.
    Listed(Vec<String>),
    ///Ask the database for its base tables.
    Discover,
}

impl TableSelection {
    pub fn from_list(tables: Vec<String>) -> TableSelection {
        if tables.is_empty() {
            TableSelection::Discover
        } else {
            TableSelection::Listed(tables)
        }
    }

    ///Resolves the selection to table names.
    ///
    ///Returns `None` when discovery failed, which is different from a schema with no tables.
    pub async fn resolve(&self, reader: &dyn DataReader) -> Option<Vec<String>> {
        match self {
            TableSelection::Listed(tables) => Some(tables.clone()),
            TableSelection::Discover => match reader.list_tables().await {
                Ok(tables) => {
                    info!(tables = tables.len(), "discovered tables");
                    Some(tables)
                }
                Err(e) => {
                    warn!(error = %e, "table discovery failed");
                    None
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backups::test_support::FakeReader;

    #[test]
    fn empty_list_discovers() {
        assert_eq!(TableSelection::from_list(Vec::new()), TableSelection::Discover);
        assert_eq!(
            TableSelection::from_list(vec!["a".into()]),
            TableSelection::Listed(vec!["a".into()])
        );
    }

    #[tokio::test]
    async fn listed_skips_discovery() {
        let reader = FakeReader::new().discovery_fails();
        let selection = TableSelection::Listed(vec!["usuarios".into(), "vendas".into()]);
        assert_eq!(
            selection.resolve(&reader).await.unwrap(),
            ["usuarios", "vendas"]
        );
    }

    #[tokio::test]
    async fn discovery() {
        let reader = FakeReader::new().with_table("a", &["id"], 1).with_table("b", &["id"], 0);
        assert_eq!(
            TableSelection::Discover.resolve(&reader).await.unwrap(),
            ["a", "b"]
        );
    }

    #[tokio::test]
    async fn failed_discovery_is_none() {
        let reader = FakeReader::new().with_table("a", &["id"], 1).discovery_fails();
        assert_eq!(TableSelection::Discover.resolve(&reader).await, None);
    }

    #[tokio::test]
    async fn empty_schema_is_not_a_failure() {
        let reader = FakeReader::new();
        assert_eq!(TableSelection::Discover.resolve(&reader).await, Some(Vec::new()));
    }
}
