use anyhow::{Context, Result};
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use toner::{Costs, Estimate};
use yew::worker::{Agent, AgentLink, HandlerId, Public};

#[derive(Serialize, Deserialize)]
pub struct ComputeData {
    pub data: Vec<u8>,
    pub costs: Costs,
}

#[derive(Serialize, Deserialize)]
pub enum Request {
    Compute(ComputeData),
}

#[derive(Serialize, Deserialize)]
pub struct EstimateData {
    pub width: u32,
    pub height: u32,
    pub estimate: Estimate,
}

#[derive(Serialize, Deserialize)]
pub enum Response {
    Estimate(EstimateData),
    Failed(String),
}

pub enum Msg {}

pub struct Worker {
    link: AgentLink<Worker>,
}

fn compute(data: &ComputeData) -> Result<EstimateData> {
    let image = toner::decode_image(&data.data).context("Could not read the uploaded image")?;
    let (width, height) = image.dimensions();
    let estimate = toner::compute_cost(&image, &data.costs)?;

    Ok(EstimateData {
        width,
        height,
        estimate,
    })
}

impl Agent for Worker {
    type Reach = Public<Self>;
    type Message = Msg;
    type Input = Request;
    type Output = Response;

    fn create(link: AgentLink<Self>) -> Self {
        Self { link }
    }

    fn update(&mut self, msg: Self::Message) {
        match msg {}
    }

    fn handle_input(&mut self, msg: Self::Input, who: HandlerId) {
        match msg {
            Request::Compute(data) => {
                let response = match compute(&data) {
                    Ok(result) => Response::Estimate(result),
                    Err(err) => Response::Failed(format!("{:#}", err)),
                };

                self.link.respond(who, response);
            }
        }
    }

    fn name_of_resource() -> &'static str {
        "worker.js"
    }
}
