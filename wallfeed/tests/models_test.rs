use serde_json::json;

use wallfeed::api::vk::VkClient;
use wallfeed::api::ApiReply;
use wallfeed::models::parse_page;
use wallfeed::models::profile::Identity;
use wallfeed::models::wall::{PostKey, Resolution};
use wallfeed::FeedError;

#[test]
fn test_parse_listing_page() {
    let body = json!({
        "response": {
            "count": 2,
            "items": [
                {
                    "id": 5,
                    "owner_id": -1,
                    "from_id": -1,
                    "date": 1_700_000_000,
                    "text": "with repost",
                    "is_pinned": 1,
                    "copy_history": [{ "id": 9, "owner_id": 3, "from_id": 3 }],
                    "likes": { "count": 4 },
                    "attachments": [{ "type": "photo", "photo": { "id": 1 } }]
                },
                { "id": 4, "owner_id": -1 }
            ],
            "profiles": [{ "id": 3, "first_name": "Grace", "last_name": "Hopper" }],
            "groups": [{ "id": 1, "name": "Compilers", "is_admin": 1, "can_post": true }]
        }
    });

    let page = parse_page(&body.to_string()).unwrap();

    assert_eq!(page.items.len(), 2);
    let first = &page.items[0];
    assert_eq!(first.key(), PostKey::new(-1, 5));
    assert!(first.is_pinned);
    assert!(first.has_repost());
    assert_eq!(first.copy_history[0].key(), PostKey::new(3, 9));
    assert_eq!(first.origin(), Some(Identity::Group(1)));
    assert_eq!(first.extra["likes"]["count"], 4);
    assert_eq!(first.attachments.len(), 1);
    assert_eq!(first.resolution, Resolution::Summary);

    let second = &page.items[1];
    assert!(!second.is_pinned);
    assert!(!second.has_repost());
    assert!(second.text.is_empty());
    assert_eq!(second.origin(), None);

    assert_eq!(page.profiles[0].identity, Identity::User(3));
    assert_eq!(page.profiles[0].name, "Grace Hopper");
    assert!(page.profiles[0].group.is_none());

    let group = &page.groups[0];
    assert_eq!(group.identity, Identity::Group(1));
    let flags = group.group.unwrap();
    assert!(flags.is_admin);
    assert!(flags.can_post);
    assert!(!flags.is_member);
}

#[test]
fn test_parse_empty_page() {
    let page = parse_page(r#"{"response": {"count": 0, "items": []}}"#).unwrap();
    assert!(page.items.is_empty());
    assert!(page.profiles.is_empty());
    assert!(page.groups.is_empty());
}

#[test]
fn test_parse_bare_item_array() {
    let page = parse_page(r#"{"response": [{"id": 1, "owner_id": 2, "is_pinned": false}]}"#)
        .unwrap();
    assert_eq!(page.items[0].key(), PostKey::new(2, 1));
}

#[test]
fn test_null_optional_fields_take_defaults() {
    let body = json!({
        "response": {
            "items": [
                { "id": 1, "owner_id": 2, "from_id": null, "text": null, "is_pinned": null },
                { "id": 3, "owner_id": 2, "copy_history": null, "attachments": null, "date": null }
            ],
            "profiles": [{ "id": 4, "first_name": "Ada", "last_name": null }],
            "groups": null
        }
    });

    let page = parse_page(&body.to_string()).unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].text.is_empty());
    assert!(!page.items[0].is_pinned);
    assert_eq!(page.items[0].origin(), None);
    assert!(!page.items[1].has_repost());
    assert!(page.items[1].attachments.is_empty());
    assert_eq!(page.profiles[0].name, "Ada");
    assert!(page.groups.is_empty());

    let bare = parse_page(r#"{"response": [{"id": 1, "owner_id": 2, "text": null}]}"#).unwrap();
    assert_eq!(bare.items[0].key(), PostKey::new(2, 1));
}

#[test]
fn test_parse_failures() {
    assert!(matches!(parse_page("{"), Err(FeedError::Decode(_))));
    assert!(matches!(parse_page("{}"), Err(FeedError::Decode(_))));
    assert!(matches!(
        parse_page(r#"{"error": {"error_code": 6, "error_msg": "Too many requests"}}"#),
        Err(FeedError::Api { code: 6, .. })
    ));
}

#[test]
fn test_non_success_reply_is_transport_error() {
    let reply = ApiReply {
        status: 500,
        body: r#"{"response": {"items": []}}"#.to_string(),
    };
    assert!(matches!(reply.into_page(), Err(FeedError::Transport(_))));
}

#[test]
fn test_post_key_round_trip() {
    let key: PostKey = "-42_7".parse().unwrap();
    assert_eq!(key, PostKey::new(-42, 7));
    assert_eq!(key.to_string(), "-42_7");
    assert_eq!(json!(key), json!("-42_7"));

    assert!("42".parse::<PostKey>().is_err());
    assert!("a_1".parse::<PostKey>().is_err());
}

#[test]
fn test_identity_signed_conversion() {
    assert_eq!(Identity::from_signed(12), Some(Identity::User(12)));
    assert_eq!(Identity::from_signed(-12), Some(Identity::Group(12)));
    assert_eq!(Identity::from_signed(0), None);
    assert_eq!(Identity::Group(12).to_signed(), -12);
    assert_eq!(json!(Identity::Group(12)), json!(-12));

    assert_eq!(Identity::from_signed(i64::MIN), None);
    assert_eq!(Identity::Group(u64::MAX).to_signed(), -i64::MAX);
    assert_eq!(Identity::User(u64::MAX).to_signed(), i64::MAX);
}

#[test]
fn test_parse_wall_ref() {
    let cases = [
        ("wall-1", Identity::Group(1)),
        ("wall1", Identity::User(1)),
        ("club22", Identity::Group(22)),
        ("public22", Identity::Group(22)),
        ("id5", Identity::User(5)),
        ("-7", Identity::Group(7)),
        ("7", Identity::User(7)),
        ("https://vk.com/wall-1_2", Identity::Group(1)),
        ("m.vk.com/club3/", Identity::Group(3)),
    ];
    for (input, expected) in cases {
        assert_eq!(VkClient::parse_wall_ref(input).unwrap(), expected, "{input}");
    }

    assert!(VkClient::parse_wall_ref("wall0").is_err());
    assert!(VkClient::parse_wall_ref("durov").is_err());
    assert!(VkClient::parse_wall_ref("-9223372036854775808").is_err());
    assert!(VkClient::parse_wall_ref("club-9223372036854775808").is_err());
}
