//! Integration tests for the message endpoints

mod common;

#[cfg(test)]
mod message_tests {
    use super::common::{create_test_server, message_body, send_test_message};
    use axum_test::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    // ============================================================
    // POST /messages - send_message
    // ============================================================

    #[sqlx::test]
    async fn test_send_message_round_trip(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let sender = Uuid::new_v4();
        let receiver = Uuid::new_v4();

        let body = json!({
            "sender": sender,
            "receiver": receiver,
            "title": "Quarterly report",
            "content": "Numbers attached.",
            "attachments": [{
                "fileName": "report.pdf",
                "contentType": "application/pdf",
                "data": [1, 2, 3, 4],
            }],
        });

        let created = send_test_message(&server, &body).await;
        assert_eq!(created["sender"], json!(sender));
        assert_eq!(created["receiver"], json!(receiver));
        assert_eq!(created["title"], "Quarterly report");
        assert_eq!(created["content"], "Numbers attached.");
        assert_eq!(created["isRead"], false);
        assert!(created["parentMessageId"].is_null());

        // detail returns the same fields and the full attachments
        let id = created["id"].as_str().expect("created message has an id");
        let response = server.get(&format!("/messages/{}", id)).await;
        response.assert_status_ok();
        let detail: serde_json::Value = response.json();

        assert_eq!(detail["sender"], json!(sender));
        assert_eq!(detail["receiver"], json!(receiver));
        assert_eq!(detail["title"], "Quarterly report");
        assert_eq!(detail["content"], "Numbers attached.");
        assert!(detail["sentAt"].is_string());
        assert_eq!(detail["isRead"], false);

        let attachments = detail["attachments"].as_array().expect("attachments array");
        assert_eq!(attachments.len(), 1);
        assert_eq!(attachments[0]["fileName"], "report.pdf");
        assert_eq!(attachments[0]["contentType"], "application/pdf");
        assert_eq!(attachments[0]["data"], json!([1, 2, 3, 4]));
        assert_eq!(attachments[0]["size"], 4);
        assert_eq!(attachments[0]["messageId"], detail["id"]);

        Ok(())
    }

    #[sqlx::test]
    async fn test_send_message_empty_title_rejected(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool.clone());

        let body = json!({
            "sender": Uuid::new_v4(),
            "receiver": Uuid::new_v4(),
            "title": "",
            "content": "Hello",
        });

        let response = server.post("/messages").json(&body).await;
        response.assert_status_bad_request();

        // nothing was persisted
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0);

        Ok(())
    }

    #[sqlx::test]
    async fn test_send_message_with_unknown_parent(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool.clone());

        let body = json!({
            "sender": Uuid::new_v4(),
            "receiver": Uuid::new_v4(),
            "title": "Re: nothing",
            "content": "Reply to a ghost",
            "parentMessageId": Uuid::new_v4(),
        });

        let response = server.post("/messages").json(&body).await;
        response.assert_status_not_found();

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0);

        Ok(())
    }

    #[sqlx::test]
    async fn test_send_reply_keeps_parent_link(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let parent = send_test_message(&server, &message_body(alice, bob)).await;
        let parent_id = parent["id"].as_str().unwrap();

        let reply_body = json!({
            "sender": bob,
            "receiver": alice,
            "title": "Re: Hi",
            "content": "Hello back",
            "parentMessageId": parent_id,
        });
        let reply = send_test_message(&server, &reply_body).await;
        assert_eq!(reply["parentMessageId"], parent["id"]);

        let response = server
            .get(&format!("/messages/{}", reply["id"].as_str().unwrap()))
            .await;
        response.assert_status_ok();
        let detail: serde_json::Value = response.json();
        assert_eq!(detail["parentMessageId"], parent["id"]);

        Ok(())
    }

    #[sqlx::test]
    async fn test_self_message_is_permitted(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let alice = Uuid::new_v4();

        let created = send_test_message(&server, &message_body(alice, alice)).await;

        let inbox: Vec<serde_json::Value> =
            server.get(&format!("/messages/inbox/{}", alice)).await.json();
        let outbox: Vec<serde_json::Value> =
            server.get(&format!("/messages/outbox/{}", alice)).await.json();

        assert!(inbox.iter().any(|m| m["id"] == created["id"]));
        assert!(outbox.iter().any(|m| m["id"] == created["id"]));

        Ok(())
    }

    // ============================================================
    // GET /messages/inbox/{receiver}, /messages/outbox/{sender}
    // ============================================================

    #[sqlx::test]
    async fn test_inbox_outbox_filtering(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let created = send_test_message(&server, &message_body(alice, bob)).await;

        let outbox_alice: Vec<serde_json::Value> =
            server.get(&format!("/messages/outbox/{}", alice)).await.json();
        assert_eq!(outbox_alice.len(), 1);
        assert_eq!(outbox_alice[0]["id"], created["id"]);

        let inbox_bob: Vec<serde_json::Value> =
            server.get(&format!("/messages/inbox/{}", bob)).await.json();
        assert_eq!(inbox_bob.len(), 1);
        assert_eq!(inbox_bob[0]["id"], created["id"]);

        let outbox_bob: Vec<serde_json::Value> =
            server.get(&format!("/messages/outbox/{}", bob)).await.json();
        assert!(outbox_bob.is_empty());

        let inbox_alice: Vec<serde_json::Value> =
            server.get(&format!("/messages/inbox/{}", alice)).await.json();
        assert!(inbox_alice.is_empty());

        Ok(())
    }

    #[sqlx::test]
    async fn test_listings_are_newest_first(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let mut sent_ids = Vec::new();
        for title in ["first", "second", "third"] {
            let body = json!({
                "sender": alice,
                "receiver": bob,
                "title": title,
                "content": "Hello",
            });
            let created = send_test_message(&server, &body).await;
            sent_ids.push(created["id"].clone());
            // distinct sent_at values so the order is well defined
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let inbox: Vec<serde_json::Value> =
            server.get(&format!("/messages/inbox/{}", bob)).await.json();
        let inbox_ids: Vec<_> = inbox.iter().map(|m| m["id"].clone()).collect();
        assert_eq!(inbox_ids, vec![
            sent_ids[2].clone(),
            sent_ids[1].clone(),
            sent_ids[0].clone(),
        ]);
        assert_eq!(inbox[0]["title"], "third");

        let outbox: Vec<serde_json::Value> =
            server.get(&format!("/messages/outbox/{}", alice)).await.json();
        let outbox_ids: Vec<_> = outbox.iter().map(|m| m["id"].clone()).collect();
        assert_eq!(outbox_ids, inbox_ids);

        Ok(())
    }

    #[sqlx::test]
    async fn test_listing_attachments_are_lightweight(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let body = json!({
            "sender": alice,
            "receiver": bob,
            "title": "With attachment",
            "content": "See attached",
            "attachments": [{
                "fileName": "notes.txt",
                "contentType": "text/plain",
                "data": [104, 105],
            }],
        });
        send_test_message(&server, &body).await;

        let inbox: Vec<serde_json::Value> =
            server.get(&format!("/messages/inbox/{}", bob)).await.json();
        assert_eq!(inbox.len(), 1);

        let attachments = inbox[0]["attachments"].as_array().unwrap();
        assert_eq!(attachments.len(), 1);
        let attachment = attachments[0].as_object().unwrap();
        assert_eq!(attachment["fileName"], "notes.txt");
        assert_eq!(attachment["size"], 2);
        // the payload never appears in listings
        assert!(!attachment.contains_key("data"));

        Ok(())
    }

    // ============================================================
    // GET /messages/{message_id} - get_message_detail
    // ============================================================

    #[sqlx::test]
    async fn test_get_message_detail_not_found(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server.get(&format!("/messages/{}", Uuid::new_v4())).await;
        response.assert_status_not_found();

        Ok(())
    }

    // ============================================================
    // PATCH /messages/{message_id}/{is_read} - mark_read
    // ============================================================

    #[sqlx::test]
    async fn test_mark_read_toggle(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let created =
            send_test_message(&server, &message_body(Uuid::new_v4(), Uuid::new_v4())).await;
        let id = created["id"].as_str().unwrap();

        let response = server.patch(&format!("/messages/{}/true", id)).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let detail: serde_json::Value = server.get(&format!("/messages/{}", id)).await.json();
        assert_eq!(detail["isRead"], true);

        let response = server.patch(&format!("/messages/{}/false", id)).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let detail: serde_json::Value = server.get(&format!("/messages/{}", id)).await.json();
        assert_eq!(detail["isRead"], false);

        Ok(())
    }

    #[sqlx::test]
    async fn test_mark_read_unknown_message(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server
            .patch(&format!("/messages/{}/true", Uuid::new_v4()))
            .await;
        response.assert_status_not_found();

        Ok(())
    }

    // ============================================================
    // DELETE /messages/{message_id} - delete_message
    // ============================================================

    #[sqlx::test]
    async fn test_delete_message_cascades_attachments(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool.clone());
        let body = json!({
            "sender": Uuid::new_v4(),
            "receiver": Uuid::new_v4(),
            "title": "Disposable",
            "content": "Delete me",
            "attachments": [{
                "fileName": "junk.bin",
                "contentType": "application/octet-stream",
                "data": [0, 0, 0],
            }],
        });
        let created = send_test_message(&server, &body).await;
        let id = created["id"].as_str().unwrap();
        let attachment_id = created["attachments"][0]["id"].as_str().unwrap();

        let response = server.delete(&format!("/messages/{}", id)).await;
        response.assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/messages/{}", id))
            .await
            .assert_status_not_found();
        server
            .get(&format!("/attachments/{}", attachment_id))
            .await
            .assert_status_not_found();

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attachments")
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 0);

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_message_with_reply_is_refused(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let parent = send_test_message(&server, &message_body(alice, bob)).await;
        let parent_id = parent["id"].as_str().unwrap();

        let reply_body = json!({
            "sender": bob,
            "receiver": alice,
            "title": "Re: Hi",
            "content": "Hello back",
            "parentMessageId": parent_id,
        });
        let reply = send_test_message(&server, &reply_body).await;

        // restricted while the reply references the parent
        let response = server.delete(&format!("/messages/{}", parent_id)).await;
        response.assert_status(StatusCode::CONFLICT);

        // removing the reply unblocks the parent
        let reply_id = reply["id"].as_str().unwrap();
        server
            .delete(&format!("/messages/{}", reply_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .delete(&format!("/messages/{}", parent_id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_unknown_message(pool: SqlitePool) -> sqlx::Result<()> {
        let server = create_test_server(pool);

        let response = server.delete(&format!("/messages/{}", Uuid::new_v4())).await;
        response.assert_status_not_found();

        Ok(())
    }
}
