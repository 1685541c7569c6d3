use super::{DateFormat, Field, Rule::*, Schema};

pub const CURRENCIES: &[&str] = &["TZS", "USD", "KES", "UGS", "RWF"];
pub const GENDERS: &[&str] = &["M", "F"];
pub const ID_TYPES: &[&str] = &["DRIVER_LICENSE", "VOTER_ID", "INTL_PASSPORT", "NATIONAL_ID"];
pub const COLLECTION_CHANNELS: &[&str] = &["TZ-TIGO-C2B", "TZ-AIRTEL-C2B"];
pub const PAYOUT_SERVICE_CODES: &[&str] = &["TZ-TIGO-B2C", "TZ-AIRTEL-B2C", "TZ-BANK-B2C", "TZ-BILLER"];
pub const BILLER_SERVICE_CODES: &[&str] = &["TZ-BILLER"];
pub const PAYOUT_COUNTRIES: &[&str] = &["TZ"];
pub const PAYOUT_CURRENCIES: &[&str] = &["TZS"];

const YMD: super::Rule = Format(DateFormat::Date);
const YMD_HIS: super::Rule = Format(DateFormat::DateTime);
const ISO_UTC: super::Rule = Format(DateFormat::IsoUtc);

const STATEMENT_RANGE: [Field; 2] = [
    Field::required("startDate", &[Date, Before("endDate"), YMD]),
    Field::required("endDate", &[Date, After("startDate"), YMD]),
];

// Banking & wallets

pub static CREATE_WALLET: Schema = Schema {
    name: "create wallet",
    fields: &[
        Field::required("firstName", &[Str]),
        Field::required("middleName", &[Str]),
        Field::required("lastName", &[Str]),
        Field::required("dateOfBirth", &[Str, Date, YMD]),
        Field::required("gender", &[Str, In(GENDERS)]),
        Field::required("identityInfo.idType", &[Str, In(ID_TYPES)]),
        Field::required("identityInfo.idNumber", &[Str]),
        Field::required(
            "identityInfo.issueDate",
            &[Date, Before("identityInfo.expiryDate"), YMD],
        ),
        Field::required(
            "identityInfo.expiryDate",
            &[Date, After("identityInfo.issueDate"), YMD],
        ),
        Field::required("address.street", &[Str]),
        Field::required("address.city", &[Str]),
        Field::required("address.postalCode", &[Str]),
        Field::required("mobileNo", &[Str]),
        Field::required("email", &[Str, Email]),
        Field::required("currencyCode", &[Str, In(CURRENCIES)]),
        Field::required("externalCustomerRef", &[Str]),
    ],
};

pub static DEPOSIT_FUNDS: Schema = Schema {
    name: "deposit funds",
    fields: &[
        Field::required("amount", &[Numeric]),
        Field::required("accountNo", &[Str]),
        Field::required("externalRefNo", &[Str]),
        Field::required("narration", &[Str]),
        Field::required("transactionDate", &[Date, YMD]),
    ],
};

pub static WITHDRAW_FUNDS: Schema = Schema {
    name: "withdraw funds",
    fields: &[
        Field::required("amount", &[Numeric]),
        Field::required("accountNo", &[Str]),
        Field::required("externalRefNo", &[Str]),
        Field::required("narration", &[Str]),
        Field::required("transactionDate", &[Date, YMD]),
    ],
};

pub static WALLET_TRANSFER: Schema = Schema {
    name: "wallet transfer",
    fields: &[
        Field::required("amount", &[Numeric]),
        Field::required("fromAccountNo", &[Str]),
        Field::required("toAccountNo", &[Str]),
        Field::required("externalRefNo", &[Str]),
        Field::required("narration", &[Str]),
        Field::required("transactionDate", &[Date, YMD]),
    ],
};

pub static WALLET_BALANCE: Schema = Schema {
    name: "wallet balance",
    fields: &[Field::required("accountNo", &[Str])],
};

pub static WALLET_STATEMENT: Schema = Schema {
    name: "wallet statement",
    fields: &[
        Field::required("accountNo", &[Str]),
        STATEMENT_RANGE[0],
        STATEMENT_RANGE[1],
    ],
};

pub static MAIN_STATEMENT: Schema = Schema {
    name: "main statement",
    fields: &STATEMENT_RANGE,
};

// Collections

pub static USSD_PUSH: Schema = Schema {
    name: "ussd push",
    fields: &[
        Field::required("channel", &[Str, In(COLLECTION_CHANNELS)]),
        Field::required("amount", &[Numeric]),
        Field::required("msisdn", &[Str]),
        Field::required("narration", &[Str]),
        Field::required("transactionRef", &[Str]),
        Field::required("transactionDate", &[Date, YMD_HIS]),
    ],
};

pub static COLLECTION_STATEMENT: Schema = Schema {
    name: "collection statement",
    fields: &STATEMENT_RANGE,
};

pub static TRANSACTION_STATUS: Schema = Schema {
    name: "transaction status",
    fields: &[
        Field::required("transactionId", &[Str]),
        Field::required("transactionRef", &[Str]),
    ],
};

// Payments

pub static WALLET_TO_MOBILE: Schema = Schema {
    name: "wallet to mobile",
    fields: &[
        Field::required("countryCode", &[Str, In(PAYOUT_COUNTRIES)]),
        Field::required("accountNo", &[Str]),
        Field::required("serviceCode", &[Str, In(PAYOUT_SERVICE_CODES)]),
        Field::required("amount", &[Numeric]),
        Field::required("msisdn", &[Str]),
        Field::required("narration", &[Str]),
        Field::required("currencyCode", &[Str, In(PAYOUT_CURRENCIES)]),
        Field::required("recipientNames", &[Str]),
        Field::required("transactionRef", &[Str]),
        Field::required("transactionDate", &[Date, YMD_HIS]),
    ],
};

pub static UTILITY_PAYMENT: Schema = Schema {
    name: "utility payment",
    fields: &[
        Field::required("countryCode", &[Str, In(PAYOUT_COUNTRIES)]),
        Field::required("accountNo", &[Str]),
        Field::required("serviceCode", &[Str, In(BILLER_SERVICE_CODES)]),
        Field::required("amount", &[Numeric]),
        Field::required("msisdn", &[Str]),
        Field::required("narration", &[Str]),
        Field::required("currencyCode", &[Str, In(PAYOUT_CURRENCIES)]),
        Field::required("recipientNames", &[Str]),
        Field::required("transactionRef", &[Str]),
        Field::required("transactionDate", &[Date, YMD_HIS]),
        Field::required("meta.billerCode", &[Str]),
        Field::required("meta.billerReference", &[Str]),
    ],
};

// eKYC

pub static INITIATE_ONBOARD: Schema = Schema {
    name: "initiate onboard",
    fields: &[
        Field::required("nin", &[Str]),
        Field::required("phoneNumber", &[Str]),
        Field::required("email", &[Email]),
        Field::required("cardIssueDate", &[Date, YMD]),
        Field::required("cardExpiryDate", &[Date, After("cardIssueDate"), YMD]),
    ],
};

pub static RETRIEVE_FIRST_QUESTION: Schema = Schema {
    name: "retrieve first question",
    fields: &[Field::required("onboardId", &[Str])],
};

pub static REPLY_TO_QUESTION: Schema = Schema {
    name: "reply to question",
    fields: &[
        Field::required("onboardId", &[Str]),
        Field::required("questionCode", &[Str]),
        Field::required("answer", &[Str]),
    ],
};

// Merchant virtual accounts

pub static CREATE_MERCHANT_ACCOUNT: Schema = Schema {
    name: "create merchant virtual account",
    fields: &[
        Field::required("companyName", &[Str]),
        Field::required("reference", &[Str]),
    ],
};

pub static ACCOUNT_BALANCE: Schema = Schema {
    name: "account balance",
    fields: &[Field::required("accountNo", &[Str])],
};

pub static ACCOUNT_STATEMENT: Schema = Schema {
    name: "account statement",
    fields: &[
        Field::required("accountNo", &[Str]),
        STATEMENT_RANGE[0],
        STATEMENT_RANGE[1],
    ],
};

// Remittance

pub static CREATE_REMITTANCE: Schema = Schema {
    name: "create remittance",
    fields: &[
        Field::required("paymentDate", &[Date, ISO_UTC]),
        Field::required("senderCurrency", &[Str, In(CURRENCIES)]),
        Field::required("senderAmount", &[Numeric]),
        Field::required("receiverCurrency", &[Str, In(CURRENCIES)]),
        Field::required("receiverAmount", &[Numeric]),
        Field::required("exchangeRate", &[Numeric]),
        Field::required("receiverAccount", &[Str]),
        Field::required("receiverChannel", &[Str]),
        Field::required("institutionCode", &[Str]),
        Field::required("partnerReference", &[Str]),
        Field::required("sender.fullName", &[Str]),
        Field::required("sender.nationality", &[Str]),
        Field::required("sender.countryCode", &[Str]),
        Field::required("sender.idType", &[Str]),
        Field::required("sender.idNumber", &[Str]),
        Field::required("sender.idExpiryDate", &[Str]),
        Field::required("sender.dateOfBirth", &[Date, YMD]),
        Field::required("sender.phoneNumber", &[Str]),
        Field::required("sender.email", &[Email]),
        Field::required("sender.address", &[Str]),
        Field::required("sender.sourceOfFundsDeclaration", &[Str]),
        Field::required("sender.purposeOfTransaction", &[Str]),
        Field::required("sender.occupation", &[Str]),
        Field::required("sender.employer", &[Str]),
        Field::required("receiver.fullName", &[Str]),
        Field::required("receiver.phoneNumber", &[Str]),
        Field::nullable("receiver.email", &[Email]),
        Field::required("receiver.countryCode", &[Str]),
    ],
};

pub static REMITTANCE_STATUS: Schema = Schema {
    name: "remittance status",
    fields: &[Field::required("partnerReference", &[Str])],
};

// Inbound callbacks

pub static MERCHANT_CALLBACK: Schema = Schema {
    name: "merchant callback",
    fields: &[
        Field::required("accountNo", &[Str]),
        Field::required("payerName", &[Str]),
        Field::required("id", &[Str]),
        Field::required("transactionId", &[Str]),
        Field::required("reference", &[Str]),
        Field::required("transactionType", &[Str]),
        Field::required("channel", &[Str]),
        Field::required("transactionDate", &[Date]),
        Field::required("postingDate", &[Date]),
        Field::required("valueDate", &[Date]),
        Field::required("currency", &[Str, In(CURRENCIES)]),
        Field::required("narration", &[Str]),
        Field::required("amountCredit", &[Numeric]),
        Field::required("amountDebit", &[Numeric]),
        Field::required("clearedBalance", &[Numeric]),
        Field::required("bookedBalance", &[Numeric]),
    ],
};

const PAYMENT_STATUS_CALLBACK_FIELDS: [Field; 3] = [
    Field::required("statusCode", &[Str]),
    Field::required("transactionRef", &[Str]),
    Field::required("transactionId", &[Str]),
];

pub static WALLET_TO_MOBILE_CALLBACK: Schema = Schema {
    name: "wallet to mobile callback",
    fields: &PAYMENT_STATUS_CALLBACK_FIELDS,
};

pub static UTILITY_PAYMENT_CALLBACK: Schema = Schema {
    name: "utility payment callback",
    fields: &PAYMENT_STATUS_CALLBACK_FIELDS,
};

pub static REMITTANCE_CALLBACK: Schema = Schema {
    name: "remittance callback",
    fields: &[
        Field::required("transactionId", &[Str]),
        Field::required("paymentDate", &[Date]),
        Field::required("senderCurrency", &[Str, In(CURRENCIES)]),
        Field::required("senderAmount", &[Numeric]),
        Field::required("receiverCurrency", &[Str, In(CURRENCIES)]),
        Field::required("receiverAmount", &[Numeric]),
        Field::required("exchangeRate", &[Numeric]),
        Field::required("transactionFee", &[Numeric]),
        Field::required("transactionAmount", &[Numeric]),
        Field::required("transactionDate", &[Date]),
        Field::required("receiverAccount", &[Str]),
        Field::required("receiverChannel", &[Str]),
        Field::required("institutionCode", &[Str]),
        Field::required("partnerReference", &[Str]),
        Field::required("institutionReference", &[Str]),
        Field::required("status", &[Str]),
        Field::required("statusCode", &[Str]),
        Field::required("statusMessage", &[Str]),
        Field::required("receiptNumber", &[Str]),
        Field::required("createdAt", &[Date]),
        Field::required("updatedAt", &[Date]),
        Field::required("completedAt", &[Date]),
    ],
};
