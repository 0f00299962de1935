//! Groups a photo collection by the people in it.
//!
//! Detection and embedding are delegated to a [`FaceDetector`] /
//! [`FaceEncoder`] capability; this crate selects one face per photo,
//! clusters the embeddings, names the clusters and lays the photos out on
//! disk, one directory per person.
//!
//! [`FaceDetector`]: detection::domain::face_detector::FaceDetector
//! [`FaceEncoder`]: detection::domain::face_encoder::FaceEncoder

pub mod shared {
    pub mod bounding_box;
    pub mod cluster_id;
    pub mod config;
    pub mod constants;
    pub mod embedding;
    pub mod frame;
    pub mod model_resolver;
    pub mod photo_record;
}

pub mod photos {
    pub mod domain {
        pub mod photo_reader;
    }
    pub mod infrastructure;
}

pub mod detection {
    pub mod domain {
        pub mod face_detector;
        pub mod face_encoder;
        pub mod primary_face;
    }
    pub mod infrastructure;
}

pub mod clustering {
    pub mod domain {
        pub mod cluster_grouper;
        pub mod dbscan_clusterer;
        pub mod face_clusterer;
    }
}

pub mod labeling {
    pub mod domain {
        pub mod cluster_labels;
        pub mod label_prompt;
        pub mod label_store;
        pub mod labeler;
    }
    pub mod infrastructure;
}

pub mod organizing {
    pub mod domain {
        pub mod file_action;
        pub mod label_sanitizer;
        pub mod photo_organizer;
    }
    pub mod infrastructure;
}

pub mod pipeline {
    pub mod organize_photos_use_case;
}
