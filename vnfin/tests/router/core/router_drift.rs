use vnfin::{Domain, Vnfin};

use crate::helpers::{VCB, drifted_shareholder_rows, m_rows, m_seq, shareholder_rows};

#[tokio::test]
async fn consecutive_drift_is_counted_per_connector_and_domain() {
    let a = m_rows("a", Domain::Shareholders, drifted_shareholder_rows());
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a)
        .with_connector(b)
        .drift_alert_threshold(2)
        .build()
        .unwrap();

    for expected in 1..=3 {
        vnfin.shareholders(VCB).await.unwrap();
        assert_eq!(vnfin.drift_count("a", Domain::Shareholders), expected);
    }
    assert_eq!(vnfin.drift_count("b", Domain::Shareholders), 0);
    assert_eq!(vnfin.drift_count("a", Domain::Officers), 0);
}

#[tokio::test]
async fn success_resets_the_drift_streak() {
    let a = m_seq(
        "a",
        Domain::Shareholders,
        vec![
            Ok(drifted_shareholder_rows()),
            Ok(drifted_shareholder_rows()),
            Ok(shareholder_rows()),
        ],
    );
    let b = m_rows("b", Domain::Shareholders, shareholder_rows());

    let vnfin = Vnfin::builder()
        .with_connector(a.clone())
        .with_connector(b)
        .build()
        .unwrap();

    vnfin.shareholders(VCB).await.unwrap();
    vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(vnfin.drift_count("a", Domain::Shareholders), 2);

    vnfin.shareholders(VCB).await.unwrap();
    assert_eq!(a.calls(), 3);
    assert_eq!(vnfin.drift_count("a", Domain::Shareholders), 0);
}
