use serde::Serialize;
use serde_json::Value;

use super::client::prepare;
use super::{AuthMode, TemboClient};
use crate::error::{StatusMapping, TemboResult};
use crate::validation::schemas;

const ONBOARD: &str = "/onboard/v1/onboard";
const ONBOARD_VERIFY: &str = "/onboard/v1/onboard/verify";

impl TemboClient {
    /// Starts a national-ID onboarding session.
    pub async fn initiate_onboard<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::INITIATE_ONBOARD, payload)?;
        self.post(AuthMode::BearerToken, ONBOARD, &payload, StatusMapping::STANDARD)
            .await
    }

    pub async fn retrieve_first_question<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> TemboResult<Value> {
        let payload = prepare(&schemas::RETRIEVE_FIRST_QUESTION, payload)?;
        self.post(AuthMode::BearerToken, ONBOARD_VERIFY, &payload, StatusMapping::STANDARD)
            .await
    }

    /// Answers the current challenge; the response carries the next one.
    pub async fn reply_to_question<P: Serialize + ?Sized>(&self, payload: &P) -> TemboResult<Value> {
        let payload = prepare(&schemas::REPLY_TO_QUESTION, payload)?;
        self.post(AuthMode::BearerToken, ONBOARD_VERIFY, &payload, StatusMapping::STANDARD)
            .await
    }
}
