//! Named GraphQL request templates, one per endpoint, with the pagination
//! dialect each one speaks. The documents are opaque, versioned payloads;
//! nothing else in the pipeline inspects them.

/// How an endpoint continues past its first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    /// Server-side unpaginated (or internally capped) queries.
    None,
    /// Connection-style: `pageInfo { hasNextPage endCursor }`, continuation
    /// via the named cursor variable (`after` or `cursor` by endpoint).
    Cursor(&'static str),
    /// Offset-style: no continuation flag; a full page (results == limit)
    /// means there may be more, continuation via `offset` + `limit`.
    Offset,
}

pub struct QuerySpec {
    /// Registry key; also the raw-response cache key.
    pub name: &'static str,
    pub operation: &'static str,
    pub document: &'static str,
    pub page: PageStyle,
    /// Extra request headers this endpoint wants.
    pub extra_headers: &'static [(&'static str, &'static str)],
}

pub const CASH_ACCOUNT_BALANCE: QuerySpec = QuerySpec {
    name: "cash_account_balance",
    operation: "CashAccountBalance",
    document: "query CashAccountBalance($accountId: ID) {\n  cashAccount(id: $accountId) {\n    id\n    spendingBalance\n  }\n}\n",
    page: PageStyle::None,
    extra_headers: &[],
};

pub const LIST_ACTIVITIES_FOR_ACCOUNT: QuerySpec = QuerySpec {
    name: "list_activities_for_account",
    operation: "ListActivitiesForAccount",
    document: "query ListActivitiesForAccount($accountId: ID!, $offset: Int, $limit: Int, $types: [String!], $sortOrder: SortOrder, $sortBy: PaginatedActivitySortBy, $futureDateString: String!) {\n  account(id: $accountId) {\n    id\n    paginatedActivities(offset: $offset, limit: $limit, types: $types, process_date_start: \"2014-01-01\", effective_date_start: \"2014-01-01\", process_date_end: $futureDateString, effective_date_end: $futureDateString, sort_order: $sortOrder, sort_by: $sortBy) {\n      offset\n      total_count\n      results {\n        id\n        type\n        sub_type\n        effective_date\n        process_date\n        net_cash {\n          amount\n          currency\n        }\n        description\n      }\n    }\n  }\n}\n",
    page: PageStyle::Offset,
    extra_headers: &[],
};

pub const LIST_DEPOSITS_FOR_ACCOUNT: QuerySpec = QuerySpec {
    name: "list_deposits_for_account",
    operation: "ListDepositsForAccount",
    document: "query ListDepositsForAccount($accountId: ID!, $offset: Int, $limit: Int, $statuses: [DepositStatus], $includeCancelled: Boolean) {\n  account(id: $accountId) {\n    id\n    deposits(offset: $offset, limit: $limit, statuses: $statuses, include_cancelled: $includeCancelled) {\n      offset\n      total_count\n      results {\n        id\n        status\n        value {\n          amount\n          currency\n        }\n        created_at\n        completed_at\n        settled_at\n        source {\n          __typename\n          ... on PaymentCard {\n            last4\n            nickname\n          }\n        }\n      }\n    }\n  }\n}\n",
    page: PageStyle::Offset,
    extra_headers: &[],
};

pub const LIST_WITHDRAWALS_FOR_ACCOUNT: QuerySpec = QuerySpec {
    name: "list_withdrawals_for_account",
    operation: "ListWithdrawalsForAccount",
    document: "query ListWithdrawalsForAccount($accountId: String!, $offset: Int, $limit: Int, $statuses: [FundsTransferStatus], $includeCancelled: Boolean) {\n  search_funds_transfers(account_id: $accountId, offset: $offset, limit: $limit, status: $statuses, include_cancelled: $includeCancelled, typename: Withdrawal) {\n    offset\n    total_count\n    results {\n      id\n      __typename\n      status\n      value {\n        amount\n        currency\n      }\n      destination {\n        __typename\n        ... on BankAccountOwner {\n          bank_account {\n            id\n          }\n        }\n      }\n      source {\n        __typename\n        ... on Account {\n          id\n        }\n      }\n      created_at\n      completed_at\n    }\n  }\n}\n",
    page: PageStyle::Offset,
    extra_headers: &[],
};

pub const SPEND_TRANSACTIONS: QuerySpec = QuerySpec {
    name: "spend_transactions",
    operation: "SpendTransactions",
    document: "query SpendTransactions($first: Int, $after: String, $accountId: String!) {\n  spendTransactions(first: $first, after: $after, accountId: $accountId) {\n    nodes {\n      id\n      postedAt\n      merchantName\n      status\n      amount\n      hasReward\n      rewardAmount\n      rewardPayoutCustodianAccountId\n      rewardPayoutCustodianAccountType\n      rewardPayoutType\n    }\n    pageInfo {\n      endCursor\n      hasNextPage\n    }\n  }\n}\n",
    page: PageStyle::Cursor("after"),
    extra_headers: &[],
};

pub const SEARCH_FUNDING_INTENTS: QuerySpec = QuerySpec {
    name: "search_funding_intents",
    operation: "SearchFundingIntentsQuery",
    document: "query SearchFundingIntentsQuery($after: String, $first: Int, $accountId: ID!) {\n  searchFundingIntents: search_funding_intents(sort_order: desc, funding_method_type: [WsBankAccount, OnlineBillPayPayee, ETransferCustomer, ETransferFundingSource], after: $after, first: $first, source_or_destination: {type: Account, id: $accountId}) {\n    edges {\n      cursor\n      node {\n        id\n        state\n        updatedAt: updated_at\n        fundableType: fundable_type\n        fundableDetails: fundable_details {\n          ... on FundingIntentDeposit {\n            createdAt: created_at\n            amount\n            currency\n          }\n          ... on FundingIntentWithdrawal {\n            createdAt: created_at\n            requestedAmountValue: requested_amount_value\n            finalAmount: final_amount {\n              amount\n              currency\n            }\n          }\n        }\n        transferMetadata: transfer_metadata {\n          ... on FundingIntentETransferReceiveMetadata {\n            sender_name\n            memo\n          }\n        }\n      }\n    }\n    pageInfo {\n      hasNextPage\n      endCursor\n    }\n  }\n}\n",
    page: PageStyle::Cursor("after"),
    extra_headers: &[],
};

pub const PAYMENTS: QuerySpec = QuerySpec {
    name: "payments",
    operation: "Payments",
    document: "query Payments($first: Int, $after: String, $statuses: [String!]) {\n  p2pPayments(first: $first, after: $after, statuses: $statuses) {\n    nodes {\n      id\n      __typename\n      createdAt\n      updatedAt\n      amount\n      status\n      type\n      senderContact {\n        identifier\n        name\n        contactee {\n          name\n        }\n      }\n      receiverContact {\n        identifier\n        name\n        contactee {\n          name\n        }\n      }\n    }\n    pageInfo {\n      endCursor\n      hasNextPage\n    }\n  }\n}\n",
    page: PageStyle::Cursor("after"),
    extra_headers: &[],
};

pub const FETCH_INTEREST_PAYOUT: QuerySpec = QuerySpec {
    name: "fetch_interest_payout",
    operation: "FetchInterestPayoutQuery",
    document: "query FetchInterestPayoutQuery($accountId: ID!, $futureDateString: String!, $sortOrder: SortOrder, $sortBy: PaginatedActivitySortBy) {\n  account(id: $accountId) {\n    id\n    paginatedActivities(offset: 0, limit: 10, types: [\"INT\", \"REIMB\"], process_date_start: \"2014-01-01\", effective_date_start: \"2014-01-01\", process_date_end: $futureDateString, effective_date_end: $futureDateString, sort_order: $sortOrder, sort_by: $sortBy) {\n      results {\n        id\n        process_date\n        net_cash {\n          amount\n          currency\n        }\n        description\n        type\n      }\n    }\n  }\n}\n",
    page: PageStyle::None,
    extra_headers: &[],
};

pub const FETCH_ACTIVITY_LIST: QuerySpec = QuerySpec {
    name: "fetch_activity_list",
    operation: "FetchActivityList",
    document: "query FetchActivityList($first: Int!, $cursor: Cursor, $accountIds: [String!], $types: [ActivityFeedItemType!], $endDate: Datetime!) {\n  activities(first: $first, after: $cursor, accountIds: $accountIds, types: $types, endDate: $endDate) {\n    edges {\n      node {\n        ...Activity\n      }\n    }\n    pageInfo {\n      hasNextPage\n      endCursor\n    }\n  }\n}\n\nfragment Activity on ActivityFeedItem {\n  accountId\n  aftOriginatorName\n  aftTransactionCategory\n  aftTransactionType\n  amount\n  amountSign\n  canonicalId\n  currency\n  eTransferEmail\n  eTransferName\n  institutionName\n  occurredAt\n  p2pHandle\n  p2pMessage\n  spendMerchant\n  status\n  subType\n  type\n}\n",
    page: PageStyle::Cursor("cursor"),
    extra_headers: &[],
};

pub const FETCH_ACTIVITY_FEED_ITEMS: QuerySpec = QuerySpec {
    name: "fetch_activity_feed_items",
    operation: "FetchActivityFeedItems",
    document: "query FetchActivityFeedItems($first: Int, $cursor: Cursor, $condition: ActivityCondition, $orderBy: [ActivitiesOrderBy!] = OCCURRED_AT_DESC) {\n  activityFeedItems(first: $first, after: $cursor, condition: $condition, orderBy: $orderBy) {\n    edges {\n      node {\n        ...Activity\n      }\n    }\n    pageInfo {\n      hasNextPage\n      endCursor\n    }\n  }\n}\n\nfragment Activity on ActivityFeedItem {\n  accountId\n  aftOriginatorName\n  aftTransactionCategory\n  aftTransactionType\n  amount\n  amountSign\n  canonicalId\n  currency\n  eTransferEmail\n  eTransferName\n  institutionName\n  occurredAt\n  p2pHandle\n  p2pMessage\n  spendMerchant\n  status\n  subType\n  type\n}\n",
    page: PageStyle::Cursor("cursor"),
    extra_headers: &[("x-ws-profile", "trade")],
};

/// Every transaction-bearing query plus the balance query, in fetch order.
pub const ALL: &[&QuerySpec] = &[
    &CASH_ACCOUNT_BALANCE,
    &LIST_ACTIVITIES_FOR_ACCOUNT,
    &LIST_DEPOSITS_FOR_ACCOUNT,
    &LIST_WITHDRAWALS_FOR_ACCOUNT,
    &SPEND_TRANSACTIONS,
    &SEARCH_FUNDING_INTENTS,
    &PAYMENTS,
    &FETCH_INTEREST_PAYOUT,
    &FETCH_ACTIVITY_LIST,
    &FETCH_ACTIVITY_FEED_ITEMS,
];
