//! Domain entities: tree nodes and the tagged data payloads they carry

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::data_type::{resolve_tag, DataType};

/// Key holding the payload discriminator inside `data`.
pub const DATA_TYPE_KEY: &str = "dataType";

/// A node of the guide tree, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Question(QuestionNode),
    Data(DataNode),
}

impl TreeNode {
    /// Wire value of the node's `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            TreeNode::Question(_) => "question",
            TreeNode::Data(_) => "data",
        }
    }
}

/// Inner node: a prompt and the options branching from it, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionNode {
    pub text: String,
    #[serde(default)]
    pub options: Vec<OptionNode>,
}

/// One selectable answer of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionNode {
    pub name: String,
    pub value: TreeNode,
}

/// Leaf node carrying a tagged payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataNode {
    #[serde(default)]
    pub data: DataValue,
}

impl DataNode {
    pub fn new(data: DataValue) -> Self {
        Self { data }
    }
}

/// Payload of a data leaf. The variant is chosen by `dataType` and fully
/// determines the shape of the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    CityAccommodation(CityAccommodation),
    BankAccountDonation(BankAccounts),
    CreditCardDonation(CreditCardDonation),
    InternationalBankAccountDonation(BankAccounts),
    InternationalUrlDonation(UrlDonation),
    GatheringList(GatheringList),
    HelpItemList(HelpItemList),
    UrlDonation(UrlDonation),
    SmsDonation(SmsDonation),
    /// Any tag outside the known set, or no tag at all.
    Unrecognized { data_type: Option<String> },
}

impl Default for DataValue {
    fn default() -> Self {
        DataValue::Unrecognized { data_type: None }
    }
}

impl DataValue {
    /// The recognized tag, if any.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            DataValue::CityAccommodation(_) => Some(DataType::CityAccommodation),
            DataValue::BankAccountDonation(_) => Some(DataType::BankAccountDonation),
            DataValue::CreditCardDonation(_) => Some(DataType::CreditCardDonation),
            DataValue::InternationalBankAccountDonation(_) => {
                Some(DataType::InternationalBankAccountDonation)
            }
            DataValue::InternationalUrlDonation(_) => Some(DataType::InternationalUrlDonation),
            DataValue::GatheringList(_) => Some(DataType::GatheringList),
            DataValue::HelpItemList(_) => Some(DataType::HelpItemList),
            DataValue::UrlDonation(_) => Some(DataType::UrlDonation),
            DataValue::SmsDonation(_) => Some(DataType::SmsDonation),
            DataValue::Unrecognized { .. } => None,
        }
    }

    /// The raw tag as it appeared on the wire.
    pub fn tag(&self) -> Option<&str> {
        match self {
            DataValue::Unrecognized { data_type } => data_type.as_deref(),
            other => other.data_type().map(DataType::as_str),
        }
    }

    pub fn is_recognized(&self) -> bool {
        self.data_type().is_some()
    }
}

/// Bank account list, shared by domestic and international bank donations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccounts {
    pub accounts: Vec<BankAccount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub name: String,
    pub branch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    /// Local currency (TL) account number.
    pub tl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eur: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gbp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCardDonation {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityAccommodation {
    pub city: String,
    pub items: Vec<AccommodationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccommodationItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub url: String,
    pub is_validated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatheringList {
    pub city: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpItemList {
    pub city: String,
    pub items: Vec<HelpItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub url: String,
    pub phone_number: String,
}

/// Single donation link, shared by domestic and international URL donations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlDonation {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsDonation {
    pub name: String,
    pub sms: String,
    pub number: String,
    pub amount: String,
}

fn fields_into<T: DeserializeOwned>(fields: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(fields))
}

fn parse_payload(tag: DataType, fields: Map<String, Value>) -> serde_json::Result<DataValue> {
    Ok(match tag {
        DataType::CityAccommodation => DataValue::CityAccommodation(fields_into(fields)?),
        DataType::BankAccountDonation => DataValue::BankAccountDonation(fields_into(fields)?),
        DataType::CreditCardDonation => DataValue::CreditCardDonation(fields_into(fields)?),
        DataType::InternationalBankAccountDonation => {
            DataValue::InternationalBankAccountDonation(fields_into(fields)?)
        }
        DataType::InternationalUrlDonation => {
            DataValue::InternationalUrlDonation(fields_into(fields)?)
        }
        DataType::GatheringList => DataValue::GatheringList(fields_into(fields)?),
        DataType::HelpItemList => DataValue::HelpItemList(fields_into(fields)?),
        DataType::UrlDonation => DataValue::UrlDonation(fields_into(fields)?),
        DataType::SmsDonation => DataValue::SmsDonation(fields_into(fields)?),
    })
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(mut fields) = Option::<Map<String, Value>>::deserialize(deserializer)? else {
            return Ok(DataValue::default());
        };

        let raw_tag = match fields.remove(DATA_TYPE_KEY) {
            None | Some(Value::Null) => return Ok(DataValue::default()),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        let Some(tag) = resolve_tag(&raw_tag) else {
            return Ok(DataValue::Unrecognized {
                data_type: Some(raw_tag),
            });
        };

        parse_payload(tag, fields)
            .map_err(|e| de::Error::custom(format!("invalid {} payload: {}", tag, e)))
    }
}

impl Serialize for DataValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let body = match self {
            DataValue::CityAccommodation(v) => serde_json::to_value(v),
            DataValue::BankAccountDonation(v) | DataValue::InternationalBankAccountDonation(v) => {
                serde_json::to_value(v)
            }
            DataValue::CreditCardDonation(v) => serde_json::to_value(v),
            DataValue::InternationalUrlDonation(v) | DataValue::UrlDonation(v) => {
                serde_json::to_value(v)
            }
            DataValue::GatheringList(v) => serde_json::to_value(v),
            DataValue::HelpItemList(v) => serde_json::to_value(v),
            DataValue::SmsDonation(v) => serde_json::to_value(v),
            DataValue::Unrecognized { .. } => Ok(Value::Object(Map::new())),
        }
        .map_err(S::Error::custom)?;

        let mut fields = match body {
            Value::Object(fields) => fields,
            _ => return Err(S::Error::custom("data payload must be an object")),
        };
        if let Some(tag) = self.tag() {
            fields.insert(DATA_TYPE_KEY.to_string(), Value::String(tag.to_string()));
        }
        fields.serialize(serializer)
    }
}
