// modules tree
pub mod domain {
    pub mod auth {
        pub mod user;
    }
    pub mod blog {
        pub mod category;
        pub mod comment;
        pub mod post;
    }
}
pub mod dto {
    pub mod requests {
        pub mod auth {
            pub mod login_request;
            pub mod register_request;
        }
        pub mod blog {
            pub mod get_posts_request;
            pub mod get_user_posts_request;
            pub mod submit_post_request;
            pub mod update_post_request;
        }
        pub mod category {
            pub mod submit_category_request;
        }
        pub mod comment {
            pub mod submit_comment_request;
            pub mod update_comment_request;
        }
    }
    pub mod responses {
        pub mod response_data;
        pub mod response_meta;

        pub mod auth {
            pub mod logout_response;
            pub mod me_response;
            pub mod session_response;
        }
        pub mod blog {
            pub mod delete_post_response;
            pub mod get_posts_response;
            pub mod post_response;
        }
        pub mod category {
            pub mod category_response;
            pub mod get_categories_response;
        }
        pub mod comment {
            pub mod comment_response;
            pub mod delete_comment_response;
            pub mod get_comments_response;
        }
    }
}
pub mod errors {
    pub mod code_error;
}
pub mod handlers {
    pub mod auth {
        pub mod login;
        pub mod logout;
        pub mod me;
        pub mod register;
    }
    pub mod blog {
        pub mod delete_post;
        pub mod get_posts;
        pub mod get_user_posts;
        pub mod read_post;
        pub mod submit_post;
        pub mod update_post;
    }
    pub mod category {
        pub mod get_categories;
        pub mod read_category;
        pub mod submit_category;
    }
    pub mod comment {
        pub mod delete_comment;
        pub mod get_comments;
        pub mod submit_comment;
        pub mod update_comment;
    }
    pub mod server {
        pub mod healthcheck;
    }
}
pub mod routers {
    pub mod main_router;
    pub mod middleware {
        pub mod auth;
        pub mod identity;
        pub mod logging;
    }
}
pub mod init {
    pub mod config;
    pub mod migrate;
    pub mod server_init;
    pub mod state;
}
pub mod util {
    pub mod crypto {
        pub mod hash_pw;
        pub mod verify_pw;
    }
    pub mod string {
        pub mod validations;
    }
    pub mod time {
        pub mod now;
    }
    pub mod validate;
}
pub mod client {
    pub mod api;
    pub mod auth;
    pub mod cache;
    pub mod error;
}
pub mod docs;
pub mod schema;
