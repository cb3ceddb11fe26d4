mod check_in;
mod error;
mod job_schedulers;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::{middleware, web, App, HttpServer};
use checkin_scheduler_infra::CheckInContext;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    check_in::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(ctx: CheckInContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(ctx.clone()).await?;

        Application::start_job_schedulers(ctx);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn start_job_schedulers(ctx: CheckInContext) {
        job_schedulers::start_missed_check_in_sweep(ctx);
    }

    async fn configure_server(ctx: CheckInContext) -> Result<(Server, u16), std::io::Error> {
        let listener = TcpListener::bind(format!("0.0.0.0:{}", ctx.config.port))?;
        let port = listener.local_addr()?.port();
        let shared_ctx = web::Data::new(ctx);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(shared_ctx.clone())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
