use std::time::Duration;

use tempfile::tempdir;
use wxfill_channel::{partition_for, UdpReceiver, UdpSender};
use wxfill_consumer::drain_partition;
use wxfill_store::SqliteStore;

/// End to end over a real socket pair: publish a small batch the way the
/// producer would, drain both partitions, and check the stored rows.
#[tokio::test]
async fn published_batch_lands_in_the_store() {
    let mut rx0 = UdpReceiver::bind("127.0.0.1:0".parse().unwrap(), 0)
        .await
        .unwrap();
    let mut rx1 = UdpReceiver::bind("127.0.0.1:0".parse().unwrap(), 1)
        .await
        .unwrap();
    let sender = UdpSender::connect(vec![rx0.local_addr().unwrap(), rx1.local_addr().unwrap()])
        .await
        .unwrap();

    let messages = [
        concat!(
            r#"{"data":[{"datetime":"2020-03-05:00","temp":10.0,"wind_spd":3.0,"dni":50.0},"#,
            r#"{"datetime":"2020-03-05:01","temp":14.0,"wind_spd":5.0,"dni":70.0}]}"#
        )
        .to_string(),
        "{'data': [{'datetime': '2020-03-06:00', 'temp': 4.0, 'wind_spd': 1.0, 'dni': None}]}"
            .to_string(),
        "garbage".to_string(),
    ];
    for (index, message) in messages.iter().enumerate() {
        sender.send(partition_for(index), message).await.unwrap();
    }

    let dir = tempdir().unwrap();
    let mut store = SqliteStore::open(dir.path().join("daily.db")).unwrap();

    let stats0 = drain_partition(0, &mut rx0, &mut store, Duration::from_millis(300))
        .await
        .unwrap();
    let stats1 = drain_partition(1, &mut rx1, &mut store, Duration::from_millis(300))
        .await
        .unwrap();

    // partitions 0,1,0 — the malformed message rode partition 0
    assert_eq!(stats0.received, 2);
    assert_eq!(stats1.received, 1);
    assert_eq!(stats0.malformed, 1);
    assert_eq!(stats0.stored + stats1.stored, 2);

    let day1 = store.get("03", "20200305").unwrap().expect("2020-03-05 row");
    assert_eq!(day1.avg_temp, Some(12.0));
    assert_eq!(day1.avg_wind_spd, Some(4.0));
    assert_eq!(day1.avg_dni, Some(60.0));

    let day2 = store.get("03", "20200306").unwrap().expect("2020-03-06 row");
    assert_eq!(day2.avg_temp, Some(4.0));
    assert_eq!(day2.avg_dni, None);
}

/// Re-running a drain over the same date overwrites the stored row.
#[tokio::test]
async fn rerun_overwrites_the_same_day() {
    let mut rx = UdpReceiver::bind("127.0.0.1:0".parse().unwrap(), 0)
        .await
        .unwrap();
    let sender = UdpSender::connect(vec![rx.local_addr().unwrap()])
        .await
        .unwrap();

    let dir = tempdir().unwrap();
    let mut store = SqliteStore::open(dir.path().join("daily.db")).unwrap();

    sender
        .send(0, r#"{"data":[{"datetime":"2020-03-05:00","temp":10.0,"wind_spd":1.0}]}"#)
        .await
        .unwrap();
    drain_partition(0, &mut rx, &mut store, Duration::from_millis(300))
        .await
        .unwrap();

    sender
        .send(0, r#"{"data":[{"datetime":"2020-03-05:00","temp":20.0,"wind_spd":2.0}]}"#)
        .await
        .unwrap();
    drain_partition(0, &mut rx, &mut store, Duration::from_millis(300))
        .await
        .unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let row = store.get("03", "20200305").unwrap().unwrap();
    assert_eq!(row.avg_temp, Some(20.0));
}
