// Hosted zone endpoints
//
// Zone listing is account-scoped and marker-paginated.

use tracing::debug;

use crate::client::ZoneClient;
use crate::error::Error;
use crate::models::{HostedZone, HostedZonesPage};
use crate::record_sets::PageLimits;

impl ZoneClient {
    /// Fetch one page of hosted zones.
    ///
    /// `GET /2013-04-01/hostedzone?maxitems={n}[&marker={m}]`
    pub async fn list_hosted_zones(
        &self,
        marker: Option<&str>,
        max_items: u32,
    ) -> Result<HostedZonesPage, Error> {
        let mut params = vec![("maxitems", max_items.to_string())];
        if let Some(marker) = marker {
            params.push(("marker", marker.to_owned()));
        }
        self.get_with_params("hostedzone", &params).await
    }

    /// Collect every hosted zone in the account, following `NextMarker`.
    pub async fn list_all_hosted_zones(&self, limits: PageLimits) -> Result<Vec<HostedZone>, Error> {
        let mut all = Vec::new();
        let mut marker: Option<String> = None;

        for page_no in 1..=limits.max_pages {
            let page = self
                .list_hosted_zones(marker.as_deref(), limits.page_size)
                .await?;
            debug!(page = page_no, received = page.hosted_zones.len(), "hosted zone page");
            all.extend(page.hosted_zones);

            if !page.is_truncated {
                return Ok(all);
            }
            marker = Some(page.next_marker.ok_or(Error::MissingCursor {
                listing: "hosted zone",
            })?);
        }

        Err(Error::PaginationLimit {
            max_pages: limits.max_pages,
        })
    }
}
