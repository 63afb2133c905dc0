#![allow(dead_code)]
use assert_cmd::Command;
use std::path::PathBuf;

/// Seven items and two annotations, cross-referenced; enough for one
/// show-more step at the default page size.
pub const SAMPLE: &str = r#"{
  "items": [
    {
      "id": "f1", "title": "The Dance of Life", "rating": 8.3,
      "release_date": "1929-08-16T00:00:00Z", "runtime_min": 115,
      "genres": ["Musical"], "description": "Burlesque comic Ralph Skid Johnson marries pretty Bonny.",
      "is_watched": true, "is_favorite": false, "in_watchlist": false,
      "annotations": ["n1", "n2"]
    },
    {
      "id": "f2", "title": "Sagebrush Trail", "rating": 3.2,
      "release_date": "1933-12-15T00:00:00Z", "runtime_min": 54,
      "genres": ["Western"], "description": "Sentenced for a murder he did not commit.",
      "is_watched": false, "is_favorite": false, "in_watchlist": true,
      "annotations": []
    },
    {
      "id": "f3", "title": "The Man with the Golden Arm", "rating": 9.0,
      "release_date": "1955-12-15T00:00:00Z", "runtime_min": 119,
      "genres": ["Drama"], "description": "Frankie Machine returns from prison a changed man.",
      "is_watched": false, "is_favorite": true, "in_watchlist": false,
      "annotations": []
    },
    {
      "id": "f4", "title": "Santa Claus Conquers the Martians", "rating": 2.3,
      "release_date": "1964-11-14T00:00:00Z", "runtime_min": 81,
      "genres": ["Comedy"], "description": "The Martians kidnap Santa Claus.",
      "is_watched": false, "is_favorite": false, "in_watchlist": false,
      "annotations": []
    },
    {
      "id": "f5", "title": "Popeye the Sailor Meets Sindbad the Sailor", "rating": 6.3,
      "release_date": "1936-11-27T00:00:00Z", "runtime_min": 16,
      "genres": ["Cartoon"], "description": "In this short, Sindbad the Sailor claims to be the greatest.",
      "is_watched": true, "is_favorite": false, "in_watchlist": false,
      "annotations": []
    },
    {
      "id": "f6", "title": "The Great Flamarion", "rating": 8.9,
      "release_date": "1945-03-30T00:00:00Z", "runtime_min": 78,
      "genres": ["Mystery"], "description": "The film opens following a murder at a cabaret.",
      "is_watched": false, "is_favorite": false, "in_watchlist": true,
      "annotations": []
    },
    {
      "id": "f7", "title": "Made for Each Other", "rating": 5.8,
      "release_date": "1939-02-10T00:00:00Z", "runtime_min": 92,
      "genres": ["Comedy"], "description": "John and Jane meet and marry on the same day.",
      "is_watched": false, "is_favorite": false, "in_watchlist": false,
      "annotations": []
    }
  ],
  "annotations": [
    {
      "id": "n1", "text": "Interesting setting and a good cast", "emoji": "smile",
      "author": "Tim Macoveev", "created_at": "2021-06-01T12:00:00Z"
    },
    {
      "id": "n2", "text": "Booooooooooring", "emoji": "sleeping",
      "author": "John Doe", "created_at": "2021-06-02T09:30:00Z"
    }
  ]
}"#;

pub struct TestEnv {
    pub dir: tempfile::TempDir,
    pub data: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_document(SAMPLE)
    }

    pub fn with_document(document: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = dir.path().join("bootstrap.json");
        std::fs::write(&data, document).expect("write bootstrap");
        Self { dir, data }
    }

    pub fn bin(&self) -> Command {
        let mut cmd = Command::cargo_bin("cineboard").expect("binary");
        cmd.arg("--data").arg(&self.data);
        cmd
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.dir.path().join("config.toml");
        std::fs::write(&path, contents).expect("write config");
        path
    }
}
