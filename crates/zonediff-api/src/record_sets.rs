// Record set endpoints
//
// Listing is zone-scoped and cursor-paginated: each truncated page names
// the (record name, record type, set identifier) the next page starts at.

use tracing::debug;

use crate::client::ZoneClient;
use crate::error::Error;
use crate::models::{RecordSetsPage, ResourceRecordSet, bare_zone_id};

/// Page size and page cap for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Items requested per page (`maxitems`).
    pub page_size: u32,
    /// Hard cap on pages fetched before giving up.
    pub max_pages: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: 300,
            max_pages: 10_000,
        }
    }
}

/// Continuation point for a record set listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSetCursor {
    name: String,
    record_type: String,
    identifier: Option<String>,
}

impl RecordSetCursor {
    /// Cursor for the page after `page`, or `None` when the listing is complete.
    ///
    /// A truncated page without a name and type to continue from is an error:
    /// re-requesting from the start would loop forever.
    pub fn after(page: &RecordSetsPage) -> Result<Option<Self>, Error> {
        if !page.is_truncated {
            return Ok(None);
        }
        match (&page.next_record_name, &page.next_record_type) {
            (Some(name), Some(record_type)) => Ok(Some(Self {
                name: name.clone(),
                record_type: record_type.clone(),
                identifier: page.next_record_identifier.clone(),
            })),
            _ => Err(Error::MissingCursor {
                listing: "record set",
            }),
        }
    }

    fn query_params(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        [
            Some(("name", self.name.clone())),
            Some(("type", self.record_type.clone())),
            self.identifier.clone().map(|id| ("identifier", id)),
        ]
        .into_iter()
        .flatten()
    }
}

impl ZoneClient {
    /// Fetch one page of record sets, starting at `cursor` if given.
    ///
    /// `GET /2013-04-01/hostedzone/{id}/rrset?maxitems={n}[&name=&type=&identifier=]`
    pub async fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<&RecordSetCursor>,
        max_items: u32,
    ) -> Result<RecordSetsPage, Error> {
        let mut params = vec![("maxitems", max_items.to_string())];
        if let Some(cursor) = cursor {
            params.extend(cursor.query_params());
        }
        let path = format!("hostedzone/{}/rrset", bare_zone_id(zone_id));
        self.get_with_params(&path, &params).await
    }

    /// Collect every record set in a zone, in service order.
    ///
    /// All-or-nothing: any failing page fails the whole listing.
    pub async fn list_all_record_sets(
        &self,
        zone_id: &str,
        limits: PageLimits,
    ) -> Result<Vec<ResourceRecordSet>, Error> {
        let mut all = Vec::new();
        let mut cursor: Option<RecordSetCursor> = None;

        for page_no in 1..=limits.max_pages {
            let page = self
                .list_record_sets(zone_id, cursor.as_ref(), limits.page_size)
                .await?;
            debug!(
                zone_id,
                page = page_no,
                received = page.resource_record_sets.len(),
                truncated = page.is_truncated,
                "record set page"
            );

            cursor = RecordSetCursor::after(&page)?;
            all.extend(page.resource_record_sets);

            if cursor.is_none() {
                return Ok(all);
            }
        }

        Err(Error::PaginationLimit {
            max_pages: limits.max_pages,
        })
    }
}
