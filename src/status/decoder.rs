//! Status payload decoding.

use crate::error::ScrapeResult;
use crate::status::types::PoolStatus;

/// Decode a `?json&full` status payload.
///
/// Unknown keys are ignored and missing keys take their zero value. Malformed
/// JSON or a type mismatch yields `ScrapeError::Decode` with the position of
/// the problem.
pub fn decode(payload: &[u8]) -> ScrapeResult<PoolStatus> {
    Ok(serde_json::from_slice(payload)?)
}

/// Encode a snapshot back to the status payload shape.
pub fn encode(status: &PoolStatus) -> ScrapeResult<Vec<u8>> {
    Ok(serde_json::to_vec(status)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::status::types::ProcessState;

    const FULL_PAYLOAD: &str = r#"{
        "pool": "www",
        "process manager": "dynamic",
        "start time": 1700000000,
        "start since": 3600,
        "accepted conn": 1234,
        "listen queue": 2,
        "max listen queue": 9,
        "listen queue len": 128,
        "idle processes": 3,
        "active processes": 1,
        "total processes": 4,
        "max active processes": 4,
        "max children reached": 1,
        "slow requests": 5,
        "processes": [
            {
                "pid": 101,
                "state": "Running",
                "start time": 1700000010,
                "start since": 3590,
                "requests": 77,
                "request duration": 1200,
                "request method": "GET",
                "request uri": "/index.php?page=1",
                "content length": 0,
                "user": "-",
                "script": "/var/www/index.php",
                "last request cpu": 12.5,
                "last request memory": 2097152
            }
        ]
    }"#;

    #[test]
    fn test_decode_full_payload() {
        let status = decode(FULL_PAYLOAD.as_bytes()).unwrap();
        assert_eq!(status.name, "www");
        assert_eq!(status.process_manager, "dynamic");
        assert_eq!(status.start_time.epoch_secs(), 1_700_000_000);
        assert_eq!(status.start_since, 3600);
        assert_eq!(status.accepted_connections, 1234);
        assert_eq!(status.listen_queue, 2);
        assert_eq!(status.max_listen_queue, 9);
        assert_eq!(status.listen_queue_length, 128);
        assert_eq!(status.idle_processes, 3);
        assert_eq!(status.active_processes, 1);
        assert_eq!(status.total_processes, 4);
        assert_eq!(status.max_active_processes, 4);
        assert_eq!(status.max_children_reached, 1);
        assert_eq!(status.slow_requests, 5);

        let p = &status.processes[0];
        assert_eq!(p.pid, 101);
        assert_eq!(p.state, ProcessState::Running);
        assert_eq!(p.start_time, 1_700_000_010);
        assert_eq!(p.requests, 77);
        assert_eq!(p.request_duration, 1200);
        assert_eq!(p.request_method, "GET");
        assert_eq!(p.request_uri, "/index.php?page=1");
        assert_eq!(p.user, "-");
        assert_eq!(p.script, "/var/www/index.php");
        assert_eq!(p.last_request_cpu, 12.5);
        assert_eq!(p.last_request_memory, 2_097_152);
    }

    #[test]
    fn test_scenario_payload() {
        let payload = br#"{"pool":"www","start time":1000000000,"processes":[{"pid":1,"state":"Idle"},{"pid":2,"state":"Running"},{"pid":3,"state":"Zombie"}]}"#;
        let status = decode(payload).unwrap();
        assert_eq!(status.name, "www");
        assert_eq!(status.processes.len(), 3);
        assert_eq!(status.processes[2].state, ProcessState::Other("Zombie".into()));
    }

    #[test]
    fn test_missing_keys_are_zero_and_unknown_keys_ignored() {
        let status = decode(br#"{"pool":"api","extra":{"nested":[1,2]}}"#).unwrap();
        assert_eq!(status.name, "api");
        assert_eq!(status.accepted_connections, 0);
        assert_eq!(status.start_time.epoch_secs(), 0);
        assert!(status.processes.is_empty());
    }

    #[test]
    fn test_type_mismatch_is_decode_error() {
        let err = decode(br#"{"pool":"www","accepted conn":"many"}"#).unwrap_err();
        match err {
            ScrapeError::Decode { message, line, column } => {
                assert!(message.contains("invalid type"), "{message}");
                assert_eq!(line, 1);
                assert!(column > 14);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = decode(b"File not found.\n").unwrap_err();
        assert!(matches!(err, ScrapeError::Decode { .. }));
    }

    #[test]
    fn test_encode_keeps_timestamp_as_integer() {
        let status = decode(FULL_PAYLOAD.as_bytes()).unwrap();
        let encoded = encode(&status).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(value["start time"], serde_json::json!(1_700_000_000));
        assert_eq!(decode(&encoded).unwrap(), status);
    }
}
